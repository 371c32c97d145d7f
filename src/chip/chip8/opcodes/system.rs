use ux::u4;

use crate::chip::{
    chip8::{
        constants::{FLAG_REGISTER, FONT_GLYPH_LEN},
        opcodes::reg,
        util::{self, ProgramCounter},
        Chip8,
    },
    frame_buffer::HEIGHT,
};

pub(super) fn clear_screen(state: &mut Chip8) -> ProgramCounter {
    state.frame_buffer.clear();
    ProgramCounter::Next
}

/// Draws an `n` byte sprite read from memory at I to (Vx, Vy). Rows wrap
/// around the bottom edge. VF reports whether any lit pixel was erased.
pub(super) fn draw(state: &mut Chip8, x: u4, y: u4, n: u4) -> ProgramCounter {
    let x = usize::from(state.registers[reg(x)]);
    let y = usize::from(state.registers[reg(y)]);

    let mut collision = false;
    for row in 0..u16::from(u8::from(n)) {
        let data = state.memory[util::indexed_address(state, row)];
        let row_y = (y + usize::from(row)) % HEIGHT;
        collision |= state.frame_buffer.draw_byte(x, row_y, data);
    }

    state.registers[FLAG_REGISTER] = u8::from(collision);
    ProgramCounter::Next
}

pub(super) fn read_delay_timer(state: &mut Chip8, x: u4) -> ProgramCounter {
    state.registers[reg(x)] = state.timers.delay();
    ProgramCounter::Next
}

/// Enters key-wait mode. Subsequent steps do nothing until a key press is
/// reported through `set_key_down`.
pub(super) fn wait_for_key(state: &mut Chip8, x: u4) -> ProgramCounter {
    log::debug!("waiting for a key press to store in V{:X}", u8::from(x));
    state.key_wait_register = Some(u8::from(x));
    ProgramCounter::Next
}

pub(super) fn set_delay_timer(state: &mut Chip8, x: u4) -> ProgramCounter {
    state.timers.set_delay(state.registers[reg(x)]);
    ProgramCounter::Next
}

pub(super) fn set_sound_timer(state: &mut Chip8, x: u4) -> ProgramCounter {
    state.timers.set_sound(state.registers[reg(x)]);
    ProgramCounter::Next
}

/// Points I at the font glyph for the low nibble of Vx.
pub(super) fn load_glyph(state: &mut Chip8, x: u4) -> ProgramCounter {
    let character = u16::from(state.registers[reg(x)] & 0xF);
    state.index = state.font_offset + character * FONT_GLYPH_LEN;
    ProgramCounter::Next
}

/// Stores hundreds, tens and ones of Vx at I, I+1 and I+2.
pub(super) fn store_bcd(state: &mut Chip8, x: u4) -> ProgramCounter {
    let value = state.registers[reg(x)];
    let digits = [value / 100, value / 10 % 10, value % 10];
    for (offset, digit) in (0..).zip(digits.iter()) {
        let address = util::indexed_address(state, offset);
        state.memory[address] = *digit;
    }
    ProgramCounter::Next
}

/// Stores V0..=Vx at I..=I+x. I is left unchanged.
pub(super) fn store_registers(state: &mut Chip8, x: u4) -> ProgramCounter {
    for register in 0..=u8::from(x) {
        let address = util::indexed_address(state, u16::from(register));
        state.memory[address] = state.registers[usize::from(register)];
    }
    ProgramCounter::Next
}

/// Loads V0..=Vx from I..=I+x. I is left unchanged.
pub(super) fn load_registers(state: &mut Chip8, x: u4) -> ProgramCounter {
    for register in 0..=u8::from(x) {
        let address = util::indexed_address(state, u16::from(register));
        state.registers[usize::from(register)] = state.memory[address];
    }
    ProgramCounter::Next
}
