/// Size of the addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Mask applied to every address computed at runtime, so that memory
/// accesses wrap around at `MEMORY_SIZE`.
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Programs are loaded at this address and the program counter starts here.
pub const PROGRAM_START: u16 = 0x200;

/// The largest program that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Default address of the font inside the reserved region.
pub const FONT_OFFSET: u16 = 0x000;

/// Length of the built-in font: 16 glyphs of 5 bytes each.
pub const FONT_LEN: u16 = 0x50; // 80

/// Bytes per font glyph.
pub const FONT_GLYPH_LEN: u16 = 5;

/// The stack grows downwards from here, inside the reserved region.
pub const STACK_TOP: u16 = 0x1FF;

/// Lowest address the stack can reach: the stack pointer is a byte, so the
/// stack spans 256 bytes before it wraps around.
pub const STACK_BOTTOM: u16 = STACK_TOP - 0xFF;

/// Register used as carry, borrow and collision flag.
pub const FLAG_REGISTER: usize = 0xF;

#[rustfmt::skip]
pub const FONT: [u8; FONT_LEN as usize] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
