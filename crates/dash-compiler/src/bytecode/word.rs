//! Bit-level encoding of instruction and immediate words.
//!
//! ```text
//!  63        48 47        32 31        16 15    8 7      0
//! ┌────────────┬────────────┬────────────┬───────┬────────┐
//! │     c      │     b      │     a      │   0   │ opcode │   instruction
//! └────────────┴────────────┴────────────┴───────┴────────┘
//! ┌─────────────────────────┬─────────────────────────────┐
//! │            0            │      raw 32-bit literal     │   immediate
//! └─────────────────────────┴─────────────────────────────┘
//! ```

use std::fmt;

use super::OpCode;

/// Index of a VM register.
pub type Register = u16;

/// One slot of the instruction buffer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Word(u64);

impl Word {
    pub const ZERO: Word = Word(0);

    pub fn from_bits(bits: u64) -> Self {
        Word(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    /// Immediate holding the two's-complement bits of an integer.
    pub fn int(value: i32) -> Self {
        Word(u64::from(value as u32))
    }

    /// Immediate holding the IEEE-754 bits of a real.
    pub fn real(value: f32) -> Self {
        Word(u64::from(value.to_bits()))
    }

    /// Raw 32-bit payload of an immediate word.
    pub fn imm_bits(self) -> u32 {
        self.0 as u32
    }

    pub fn as_int(self) -> i32 {
        self.imm_bits() as i32
    }

    pub fn as_real(self) -> f32 {
        f32::from_bits(self.imm_bits())
    }

    pub fn opcode(self) -> Option<OpCode> {
        OpCode::from_u8(self.0 as u8)
    }

    pub fn a(self) -> Register {
        (self.0 >> 16) as Register
    }

    pub fn b(self) -> Register {
        (self.0 >> 32) as Register
    }

    pub fn c(self) -> Register {
        (self.0 >> 48) as Register
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:#018x})", self.0)
    }
}

/// A decoded instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub op: OpCode,
    pub a: Register,
    pub b: Register,
    pub c: Register,
}

impl Instruction {
    pub fn new(op: OpCode, a: Register, b: Register, c: Register) -> Self {
        Self { op, a, b, c }
    }

    pub fn encode(self) -> Word {
        Word(
            u64::from(u8::from(self.op))
                | (u64::from(self.a) << 16)
                | (u64::from(self.b) << 32)
                | (u64::from(self.c) << 48),
        )
    }

    /// `None` when the low byte is not a known opcode.
    pub fn decode(word: Word) -> Option<Self> {
        Some(Self {
            op: word.opcode()?,
            a: word.a(),
            b: word.b(),
            c: word.c(),
        })
    }
}

impl From<Instruction> for Word {
    fn from(instr: Instruction) -> Self {
        instr.encode()
    }
}
