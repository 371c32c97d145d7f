mod arithmetic_and_logic;
mod program_flow;
mod system;

use core::convert::TryFrom;

use thiserror::Error;
use ux::{u12, u4};

use crate::chip::chip8::{util::ProgramCounter, Chip8};

/// Represents a Chip 8 opcode. A Chip 8 opcode is two bytes long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Opcode {
    /// The instruction class is the most significant nibble of the opcode.
    /// Note that we use a u8 to represent the instruction class here for
    /// convenience, but ensure that a valid opcode can only be constructed
    /// if the four most significant bits of the u8 are 0.
    instruction_class: u8,
    /// The payload constitutes the remaining nibbles of the opcode.
    payload: OpcodePayload,
}

/// Represents the payload of a Chip 8 opcode. That is the opcode without
/// the most significant nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct OpcodePayload {
    /// The nibbles representing the payload.
    nibbles: [u4; 3],
}

impl OpcodePayload {
    /// Interprets the opcode payload as an address in the range 0x000 to
    /// 0xFFF (inclusive).
    fn address(&self) -> u12 {
        u12::new(
            u16::from(u8::from(self.nibbles[0])) << 8
                | u16::from(u8::from(self.nibbles[1])) << 4
                | u16::from(u8::from(self.nibbles[2])),
        )
    }

    /// Interprets the most significant nibble of the payload as a register
    /// and the remaining nibbles as an immediate byte.
    fn reg_and_value(&self) -> (u4, u8) {
        (
            self.nibbles[0],
            u8::from(self.nibbles[1]) << 4 | u8::from(self.nibbles[2]),
        )
    }

    /// Interprets the opcode payload as three operands, each of size
    /// one nibble.
    fn operands(&self) -> (u4, u4, u4) {
        (self.nibbles[0], self.nibbles[1], self.nibbles[2])
    }
}

impl Opcode {
    /// Constructs a new `Opcode` given its big-endian byte representation.
    pub(super) fn new(opcode: &[u8; 2]) -> Opcode {
        Opcode {
            instruction_class: opcode[0] >> 4,
            payload: OpcodePayload {
                nibbles: [
                    u4::new(opcode[0] & 0xF),
                    u4::new(opcode[1] >> 4),
                    u4::new(opcode[1] & 0xF),
                ],
            },
        }
    }

    /// The instruction word this opcode was decoded from.
    pub(super) fn word(&self) -> u16 {
        u16::from(self.instruction_class) << 12 | u16::from(self.payload.address())
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Opcode {
        Opcode::new(&word.to_be_bytes())
    }
}

/// Captures errors when converting opcodes to their respective instruction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstructionParsingError {
    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),
}

/// Operations of the 0x8 family, selected by the last nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AluOp {
    Ld,
    Or,
    And,
    Xor,
    Add,
    Sub,
    Shr,
    Subn,
    Shl,
}

/// A decoded instruction. Register operands are nibbles, addresses are
/// twelve bits wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1nnn
    Jp(u12),
    /// 2nnn
    Call(u12),
    /// 3xkk
    SeImm { x: u4, kk: u8 },
    /// 4xkk
    SneImm { x: u4, kk: u8 },
    /// 5xy0
    SeReg { x: u4, y: u4 },
    /// 6xkk
    LdImm { x: u4, kk: u8 },
    /// 7xkk
    AddImm { x: u4, kk: u8 },
    /// 8xy0 - 8xyE
    Alu { x: u4, y: u4, op: AluOp },
    /// 9xy0
    SneReg { x: u4, y: u4 },
    /// Annn
    LdI(u12),
    /// Bnnn
    JpV0(u12),
    /// Cxkk
    Rnd { x: u4, kk: u8 },
    /// Dxyn
    Drw { x: u4, y: u4, n: u4 },
    /// Ex9E
    Skp(u4),
    /// ExA1
    Sknp(u4),
    /// Fx07
    LdVxDt(u4),
    /// Fx0A
    LdVxK(u4),
    /// Fx15
    LdDtVx(u4),
    /// Fx18
    LdStVx(u4),
    /// Fx1E
    AddIVx(u4),
    /// Fx29
    LdFVx(u4),
    /// Fx33
    LdBVx(u4),
    /// Fx55
    StoreRegisters(u4),
    /// Fx65
    LoadRegisters(u4),
}

impl TryFrom<Opcode> for Instruction {
    type Error = InstructionParsingError;

    fn try_from(opcode: Opcode) -> Result<Self, Self::Error> {
        use Instruction::*;

        let payload = &opcode.payload;
        let (x, kk) = payload.reg_and_value();
        let (_, y, n) = payload.operands();

        let instruction = match (opcode.instruction_class, u8::from(n)) {
            (0x0, _) => match u16::from(payload.address()) {
                0x0E0 => Cls,
                0x0EE => Ret,
                _ => return Err(InstructionParsingError::UnknownOpcode(opcode.word())),
            },
            (0x1, _) => Jp(payload.address()),
            (0x2, _) => Call(payload.address()),
            (0x3, _) => SeImm { x, kk },
            (0x4, _) => SneImm { x, kk },
            (0x5, 0x0) => SeReg { x, y },
            (0x6, _) => LdImm { x, kk },
            (0x7, _) => AddImm { x, kk },
            (0x8, selector) => {
                let op = match selector {
                    0x0 => AluOp::Ld,
                    0x1 => AluOp::Or,
                    0x2 => AluOp::And,
                    0x3 => AluOp::Xor,
                    0x4 => AluOp::Add,
                    0x5 => AluOp::Sub,
                    0x6 => AluOp::Shr,
                    0x7 => AluOp::Subn,
                    0xE => AluOp::Shl,
                    _ => return Err(InstructionParsingError::UnknownOpcode(opcode.word())),
                };
                Alu { x, y, op }
            }
            (0x9, 0x0) => SneReg { x, y },
            (0xA, _) => LdI(payload.address()),
            (0xB, _) => JpV0(payload.address()),
            (0xC, _) => Rnd { x, kk },
            (0xD, _) => Drw { x, y, n },
            (0xE, _) => match kk {
                0x9E => Skp(x),
                0xA1 => Sknp(x),
                _ => return Err(InstructionParsingError::UnknownOpcode(opcode.word())),
            },
            (0xF, _) => match kk {
                0x07 => LdVxDt(x),
                0x0A => LdVxK(x),
                0x15 => LdDtVx(x),
                0x18 => LdStVx(x),
                0x1E => AddIVx(x),
                0x29 => LdFVx(x),
                0x33 => LdBVx(x),
                0x55 => StoreRegisters(x),
                0x65 => LoadRegisters(x),
                _ => return Err(InstructionParsingError::UnknownOpcode(opcode.word())),
            },
            _ => return Err(InstructionParsingError::UnknownOpcode(opcode.word())),
        };
        Ok(instruction)
    }
}

impl Instruction {
    /// Executes `self` relative to the given state and reports how the
    /// program counter has to move. Note that this method will in-place
    /// modify the given state but never touches the program counter itself.
    pub(super) fn execute(self, state: &mut Chip8) -> ProgramCounter {
        use Instruction::*;

        match self {
            Cls => system::clear_screen(state),
            Ret => program_flow::ret(state),
            Jp(address) => program_flow::jump(address),
            Call(address) => program_flow::call(state, address),
            SeImm { x, kk } => program_flow::skip_if_equal(state, x, kk),
            SneImm { x, kk } => program_flow::skip_if_not_equal(state, x, kk),
            SeReg { x, y } => program_flow::skip_if_registers_equal(state, x, y),
            LdImm { x, kk } => arithmetic_and_logic::load(state, x, kk),
            AddImm { x, kk } => arithmetic_and_logic::add(state, x, kk),
            Alu { x, y, op } => arithmetic_and_logic::apply(state, x, y, op),
            SneReg { x, y } => program_flow::skip_if_registers_not_equal(state, x, y),
            LdI(address) => arithmetic_and_logic::load_index(state, address),
            JpV0(address) => program_flow::jump_plus_v0(state, address),
            Rnd { x, kk } => arithmetic_and_logic::random(state, x, kk),
            Drw { x, y, n } => system::draw(state, x, y, n),
            Skp(x) => program_flow::skip_if_key(state, x, true),
            Sknp(x) => program_flow::skip_if_key(state, x, false),
            LdVxDt(x) => system::read_delay_timer(state, x),
            LdVxK(x) => system::wait_for_key(state, x),
            LdDtVx(x) => system::set_delay_timer(state, x),
            LdStVx(x) => system::set_sound_timer(state, x),
            AddIVx(x) => arithmetic_and_logic::add_index(state, x),
            LdFVx(x) => system::load_glyph(state, x),
            LdBVx(x) => system::store_bcd(state, x),
            StoreRegisters(x) => system::store_registers(state, x),
            LoadRegisters(x) => system::load_registers(state, x),
        }
    }
}

/// Index into the register file for a register nibble.
fn reg(x: u4) -> usize {
    usize::from(u8::from(x))
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:04X}", self.word())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(word: u16) -> Result<Instruction, InstructionParsingError> {
        Instruction::try_from(Opcode::from(word))
    }

    #[test]
    fn test_opcode_fields() {
        let opcode = Opcode::from(0xABCD);
        assert_eq!(opcode.instruction_class, 0xA);
        assert_eq!(u16::from(opcode.payload.address()), 0xBCD);
        assert_eq!(opcode.payload.reg_and_value(), (u4::new(0xB), 0xCD));
        assert_eq!(
            opcode.payload.operands(),
            (u4::new(0xB), u4::new(0xC), u4::new(0xD))
        );
        assert_eq!(opcode.word(), 0xABCD);
    }

    #[test]
    fn test_decode_families() {
        assert_eq!(decode(0x00E0), Ok(Instruction::Cls));
        assert_eq!(decode(0x00EE), Ok(Instruction::Ret));
        assert_eq!(decode(0x1234), Ok(Instruction::Jp(u12::new(0x234))));
        assert_eq!(
            decode(0x8AB4),
            Ok(Instruction::Alu {
                x: u4::new(0xA),
                y: u4::new(0xB),
                op: AluOp::Add
            })
        );
        assert_eq!(
            decode(0xD125),
            Ok(Instruction::Drw {
                x: u4::new(1),
                y: u4::new(2),
                n: u4::new(5)
            })
        );
        assert_eq!(decode(0xE3A1), Ok(Instruction::Sknp(u4::new(3))));
        assert_eq!(decode(0xF765), Ok(Instruction::LoadRegisters(u4::new(7))));
    }

    #[test]
    fn test_decode_misses() {
        for &word in &[0x0000, 0x0123, 0x5121, 0x800F, 0x9AB1, 0xE09F, 0xF0FF] {
            assert_eq!(
                decode(word),
                Err(InstructionParsingError::UnknownOpcode(word)),
                "{:04X} should not decode",
                word
            );
        }
    }
}
