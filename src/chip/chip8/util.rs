use crate::chip::chip8::{constants::ADDRESS_MASK, Chip8};

/// How the program counter moves once an instruction has executed.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum ProgramCounter {
    /// Continue with the following instruction.
    Next,
    /// Skip the following instruction.
    Skip,
    /// Continue at the given address; no implicit increment.
    Jump(u16),
}

pub(super) fn conditional_skip(condition: bool) -> ProgramCounter {
    if condition {
        ProgramCounter::Skip
    } else {
        ProgramCounter::Next
    }
}

pub(super) fn increment_program_counter(state: &mut Chip8) {
    state.program_counter = state.program_counter.wrapping_add(2) & ADDRESS_MASK;
}

pub(super) fn update_program_counter(state: &mut Chip8, update: ProgramCounter) {
    match update {
        ProgramCounter::Next => increment_program_counter(state),
        ProgramCounter::Skip => {
            increment_program_counter(state);
            increment_program_counter(state);
        }
        ProgramCounter::Jump(address) => state.program_counter = address & ADDRESS_MASK,
    }
}

/// Resolves an address relative to the index register, wrapping at the end
/// of memory.
pub(super) fn indexed_address(state: &Chip8, offset: u16) -> usize {
    (state.index.wrapping_add(offset) & ADDRESS_MASK) as usize
}
