use rand::{thread_rng, Rng};
use ux::{u12, u4};

use crate::chip::chip8::{
    constants::FLAG_REGISTER,
    opcodes::{reg, AluOp},
    util::ProgramCounter,
    Chip8,
};

pub(super) fn load(state: &mut Chip8, x: u4, kk: u8) -> ProgramCounter {
    state.registers[reg(x)] = kk;
    ProgramCounter::Next
}

/// Vx += kk without touching the flag register.
pub(super) fn add(state: &mut Chip8, x: u4, kk: u8) -> ProgramCounter {
    state.registers[reg(x)] = state.registers[reg(x)].wrapping_add(kk);
    ProgramCounter::Next
}

/// Executes one of the 0x8 family operations.
///
/// Flags are computed from the operand values read before Vx is written.
/// The shifts only look at Vx; Vy is ignored. VF is written last, so an
/// operation targeting VF itself ends up holding the flag.
pub(super) fn apply(state: &mut Chip8, x: u4, y: u4, op: AluOp) -> ProgramCounter {
    fn modify_registers(state: &mut Chip8, x: u4, y: u4, f: fn(u8, u8) -> (u8, Option<bool>)) {
        let (value, flag) = f(state.registers[reg(x)], state.registers[reg(y)]);
        state.registers[reg(x)] = value;
        if let Some(flag) = flag {
            state.registers[FLAG_REGISTER] = u8::from(flag);
        }
    }

    match op {
        AluOp::Ld => modify_registers(state, x, y, |_, vy| (vy, None)),
        AluOp::Or => modify_registers(state, x, y, |vx, vy| (vx | vy, None)),
        AluOp::And => modify_registers(state, x, y, |vx, vy| (vx & vy, None)),
        AluOp::Xor => modify_registers(state, x, y, |vx, vy| (vx ^ vy, None)),
        AluOp::Add => modify_registers(state, x, y, |vx, vy| {
            let (result, carry) = vx.overflowing_add(vy);
            (result, Some(carry))
        }),
        AluOp::Sub => modify_registers(state, x, y, |vx, vy| (vx.wrapping_sub(vy), Some(vx > vy))),
        AluOp::Shr => modify_registers(state, x, y, |vx, _| (vx >> 1, Some(vx & 0x01 != 0))),
        AluOp::Subn => {
            modify_registers(state, x, y, |vx, vy| (vy.wrapping_sub(vx), Some(vy > vx)))
        }
        AluOp::Shl => modify_registers(state, x, y, |vx, _| (vx << 1, Some(vx & 0x80 != 0))),
    };
    ProgramCounter::Next
}

pub(super) fn load_index(state: &mut Chip8, address: u12) -> ProgramCounter {
    state.index = u16::from(address);
    ProgramCounter::Next
}

/// I += Vx, no flag.
pub(super) fn add_index(state: &mut Chip8, x: u4) -> ProgramCounter {
    state.index = state.index.wrapping_add(u16::from(state.registers[reg(x)]));
    ProgramCounter::Next
}

/// Vx = random byte & kk.
pub(super) fn random(state: &mut Chip8, x: u4, kk: u8) -> ProgramCounter {
    let sample: u8 = thread_rng().gen();
    state.registers[reg(x)] = sample & kk;
    ProgramCounter::Next
}
