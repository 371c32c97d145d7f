/// CHIP-8 constants.
pub mod constants;
/// Decoding of opcodes and their execution.
mod opcodes;
/// The delay and sound timers.
pub mod timers;
/// Convenience functions for modification of the CHIP-8 state.
mod util;


use core::convert::TryFrom;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub use crate::chip::chip8::opcodes::InstructionParsingError;

use crate::chip::{
    chip8::{
        constants::{
            ADDRESS_MASK, FONT, FONT_LEN, FONT_OFFSET, MAX_PROGRAM_SIZE, MEMORY_SIZE,
            PROGRAM_START, STACK_BOTTOM, STACK_TOP,
        },
        opcodes::{Instruction, Opcode},
        timers::Timers,
    },
    frame_buffer::{FrameBuffer, Vram},
    Chip, Chip8Error, LoadProgramError,
};

/// Represents the state of the CHIP-8.
pub struct Chip8 {
    /// 4096 bytes of main memory. The font and the stack live below
    /// `PROGRAM_START`.
    memory: [u8; MEMORY_SIZE],

    /// 16 registers where each can store one byte. VF doubles as flag.
    registers: [u8; 16],

    /// The index register.
    index: u16,

    /// The program counter. Always within 0x000 - 0xFFF.
    program_counter: u16,

    /// Number of bytes currently on the stack, which grows downwards from
    /// `STACK_TOP`.
    stack_pointer: u8,

    /// The delay and sound timers. Shared so that they can be ticked from
    /// a different thread than the one executing instructions.
    timers: Arc<Timers>,

    /// The video memory. Shared so that it can be read from a different
    /// thread than the one executing instructions.
    frame_buffer: Arc<FrameBuffer>,

    /// The input pins. Note that those input pins are usually directly wired
    /// up to the keys, so pin `n` is the pressed state of key `n`.
    input_pins: [bool; 16],

    /// While waiting for a key press, the register the key should be
    /// written to.
    key_wait_register: Option<u8>,

    /// Address of the first font glyph.
    font_offset: u16,
}

impl Chip for Chip8 {
    /// Keys are numbered 0x0 - 0xF. We use a whole byte here and ignore
    /// anything out of range.
    type KeyIndex = u8;

    fn load_program(&mut self, path: &Path) -> Result<usize, LoadProgramError> {
        let program = fs::read(path).map_err(|source| LoadProgramError::CouldNotReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read {} bytes from {}", program.len(), path.display());
        self.load_program_bytes(&program)
    }

    fn load_program_bytes(&mut self, program: &[u8]) -> Result<usize, LoadProgramError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadProgramError::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }

        let start = usize::from(PROGRAM_START);
        self.memory[start..start + program.len()].copy_from_slice(program);
        log::info!("loaded {} bytes at {:#05X}", program.len(), PROGRAM_START);
        Ok(program.len())
    }

    fn step(&mut self) {
        if self.key_wait_register.is_some() {
            return;
        }

        let opcode = self.next_instruction();
        log::trace!("{:03X}: {}", self.program_counter, opcode);

        match Instruction::try_from(opcode) {
            Ok(instruction) => {
                let update = instruction.execute(self);
                util::update_program_counter(self, update);
            }
            Err(e) => {
                log::debug!("{} at {:03X}, skipping", e, self.program_counter);
                util::increment_program_counter(self);
            }
        }
    }

    fn tick_timers(&self) {
        self.timers.tick();
    }

    fn set_key_down(&mut self, key: u8, down: bool) {
        if key > 0xF {
            log::warn!("ignoring state change of unknown key {:#04X}", key);
            return;
        }
        self.input_pins[usize::from(key)] = down;

        if down {
            if let Some(register) = self.key_wait_register.take() {
                log::debug!("key {:X} resolves wait for V{:X}", key, register);
                self.registers[usize::from(register)] = key;
            }
        }
    }

    fn reset_keys(&mut self) {
        self.input_pins = [false; 16];
    }

    fn is_sound_playing(&self) -> bool {
        self.timers.is_sound_playing()
    }

    fn snapshot(&self) -> Vram {
        self.frame_buffer.snapshot()
    }
}

impl Chip8 {
    /// Constructs a new CHIP-8 and appropriately initializes all fields so that
    /// it is ready for the first execution cycle. Essentially this means that
    /// the program counter is set to 0x200 and the default CHIP-8 font is
    /// loaded at memory address `FONT_OFFSET`. Note that no program is
    /// loaded upon initialization.
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font_start = usize::from(FONT_OFFSET);
        memory[font_start..font_start + FONT.len()].copy_from_slice(&FONT);

        Chip8 {
            memory,
            registers: [0; 16],
            index: 0,
            program_counter: PROGRAM_START,
            stack_pointer: 0,
            timers: Arc::new(Timers::new()),
            frame_buffer: Arc::new(FrameBuffer::new()),
            input_pins: [false; 16],
            key_wait_register: None,
            font_offset: FONT_OFFSET,
        }
    }

    /// Constructs a new CHIP-8 with the font placed at `font_offset`. The
    /// font has to fit below the memory used by the stack.
    pub fn with_font_offset(font_offset: u16) -> Result<Self, Chip8Error> {
        if font_offset.checked_add(FONT_LEN).map_or(true, |end| end > STACK_BOTTOM) {
            return Err(Chip8Error::FontOffsetOutOfRange(font_offset));
        }

        let mut chip8 = Chip8::new();
        chip8.memory[..usize::from(PROGRAM_START)].fill(0);
        let font_start = usize::from(font_offset);
        chip8.memory[font_start..font_start + FONT.len()].copy_from_slice(&FONT);
        chip8.font_offset = font_offset;
        Ok(chip8)
    }

    /// Fetches the instruction at the program counter. Both bytes are read
    /// with wrap-around at the end of memory.
    fn next_instruction(&self) -> Opcode {
        let pc = self.program_counter & ADDRESS_MASK;
        Opcode::new(&[
            self.memory[usize::from(pc)],
            self.memory[usize::from(pc.wrapping_add(1) & ADDRESS_MASK)],
        ])
    }

    /// Pushes a byte onto the stack. The stack pointer wraps around after
    /// 256 bytes, overwriting the oldest entries.
    pub fn push(&mut self, value: u8) {
        self.memory[usize::from(STACK_TOP - u16::from(self.stack_pointer))] = value;
        self.stack_pointer = self.stack_pointer.wrapping_add(1);
        if self.stack_pointer == 0 {
            log::warn!("stack overflow, stack pointer wrapped around");
        }
    }

    /// Pops the byte pushed most recently.
    pub fn pop(&mut self) -> u8 {
        if self.stack_pointer == 0 {
            log::warn!("stack underflow, stack pointer wrapped around");
        }
        self.stack_pointer = self.stack_pointer.wrapping_sub(1);
        self.memory[usize::from(STACK_TOP - u16::from(self.stack_pointer))]
    }

    /// Returns whether the given key is currently pressed.
    pub fn is_key_down(&self, key: u8) -> bool {
        self.input_pins
            .get(usize::from(key))
            .copied()
            .unwrap_or(false)
    }

    /// Reads a byte of memory. The address wraps at 4096.
    pub fn read_memory(&self, address: u16) -> u8 {
        self.memory[usize::from(address & ADDRESS_MASK)]
    }

    /// A copy of the general purpose registers.
    pub fn registers(&self) -> [u8; 16] {
        self.registers
    }

    /// The value of register `Vx`, where `x` is taken modulo 16.
    pub fn register(&self, x: u8) -> u8 {
        self.registers[usize::from(x & 0xF)]
    }

    pub fn pc(&self) -> u16 {
        self.program_counter
    }

    pub fn sp(&self) -> u8 {
        self.stack_pointer
    }

    pub fn i(&self) -> u16 {
        self.index
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay()
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound()
    }

    /// The register waiting for a key press, if any.
    pub fn key_wait_register(&self) -> Option<u8> {
        self.key_wait_register
    }

    pub fn font_offset(&self) -> u16 {
        self.font_offset
    }

    /// The video memory driven by this chip.
    pub fn frame_buffer(&self) -> Arc<FrameBuffer> {
        Arc::clone(&self.frame_buffer)
    }

    /// The timers of this chip, for ticking them from another thread.
    pub fn timers(&self) -> Arc<Timers> {
        Arc::clone(&self.timers)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Chip8::new()
    }
}
