use ux::{u12, u4};

use crate::chip::chip8::{
    opcodes::reg,
    util::{self, ProgramCounter},
    Chip8,
};

/// Pops the return address, high byte first.
pub(super) fn ret(state: &mut Chip8) -> ProgramCounter {
    let high = state.pop();
    let low = state.pop();
    ProgramCounter::Jump(u16::from_be_bytes([high, low]))
}

pub(super) fn jump(address: u12) -> ProgramCounter {
    ProgramCounter::Jump(u16::from(address))
}

/// Pushes the address of the following instruction, low byte first, so that
/// `ret` pops its high byte first.
pub(super) fn call(state: &mut Chip8, address: u12) -> ProgramCounter {
    let [high, low] = state.program_counter.wrapping_add(2).to_be_bytes();
    state.push(low);
    state.push(high);
    ProgramCounter::Jump(u16::from(address))
}

pub(super) fn jump_plus_v0(state: &Chip8, address: u12) -> ProgramCounter {
    ProgramCounter::Jump(u16::from(address).wrapping_add(u16::from(state.registers[0])))
}

pub(super) fn skip_if_equal(state: &Chip8, x: u4, kk: u8) -> ProgramCounter {
    util::conditional_skip(state.registers[reg(x)] == kk)
}

pub(super) fn skip_if_not_equal(state: &Chip8, x: u4, kk: u8) -> ProgramCounter {
    util::conditional_skip(state.registers[reg(x)] != kk)
}

pub(super) fn skip_if_registers_equal(state: &Chip8, x: u4, y: u4) -> ProgramCounter {
    util::conditional_skip(state.registers[reg(x)] == state.registers[reg(y)])
}

pub(super) fn skip_if_registers_not_equal(state: &Chip8, x: u4, y: u4) -> ProgramCounter {
    util::conditional_skip(state.registers[reg(x)] != state.registers[reg(y)])
}

/// Skips if the key named by the low nibble of Vx is in the `pressed` state.
pub(super) fn skip_if_key(state: &Chip8, x: u4, pressed: bool) -> ProgramCounter {
    let key = usize::from(state.registers[reg(x)] & 0xF);
    util::conditional_skip(state.input_pins[key] == pressed)
}
