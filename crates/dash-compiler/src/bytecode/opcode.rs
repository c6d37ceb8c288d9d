//! Instruction set of the dash register VM.
//!
//! Every instruction is one word: an 8-bit opcode and three 16-bit register
//! operands `a`, `b`, `c`. By convention `c` receives the result. Opcodes
//! that carry a literal (see [`OpCode::has_immediate`]) are followed by one
//! immediate word.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Bytecode operation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum OpCode {
    /// Does nothing.
    Nop = 0,

    // =========================================================================
    // Data movement
    // =========================================================================
    /// `r[c] = imm`. The immediate word holds the raw bits of an `i32` or
    /// `f32`; the VM does not convert them.
    Stor,
    /// `r[c] = r[a]`.
    Mov,

    // =========================================================================
    // Integer arithmetic: r[c] = r[a] op r[b]
    // =========================================================================
    AddI,
    SubI,
    MulI,
    DivI,

    // =========================================================================
    // Real arithmetic: r[c] = r[a] op r[b]
    // =========================================================================
    AddF,
    SubF,
    MulF,
    DivF,

    // =========================================================================
    // Comparison: r[c] = (r[a] op r[b]) as int
    //
    // There is no greater-than; the compiler swaps `a` and `b` instead.
    // =========================================================================
    /// Integer `<`.
    CmpLI,
    /// Integer `<=`.
    CmpLeI,
    /// Real `<`.
    CmpLF,
    /// Real `<=`.
    CmpLeF,

    // =========================================================================
    // Conversion: r[c] = convert(r[a])
    // =========================================================================
    /// Real to integer.
    CastI,
    /// Integer to real.
    CastF,

    // =========================================================================
    // Procedures
    // =========================================================================
    /// Call procedure `a` with its arguments in the window starting at `b`.
    /// The outputs overwrite the window starting at `c`.
    Call,
    /// Return the `b` values starting at register `a` to the caller's window.
    Ret,

    // =========================================================================
    // Control flow (relative offset in the immediate word)
    // =========================================================================
    /// Unconditional jump.
    Jmp,
    /// Jump when `r[a] == 0`.
    Jz,
}

impl OpCode {
    /// Decode an opcode byte.
    pub fn from_u8(byte: u8) -> Option<Self> {
        Self::try_from(byte).ok()
    }

    /// Whether an immediate word follows the instruction.
    pub fn has_immediate(self) -> bool {
        matches!(self, OpCode::Stor | OpCode::Jmp | OpCode::Jz)
    }

    /// Number of words the instruction occupies.
    pub fn width(self) -> usize {
        if self.has_immediate() { 2 } else { 1 }
    }

    /// Mnemonic used in disassembly.
    pub fn name(self) -> &'static str {
        match self {
            OpCode::Nop => "nop",
            OpCode::Stor => "stor",
            OpCode::Mov => "mov",
            OpCode::AddI => "addi",
            OpCode::SubI => "subi",
            OpCode::MulI => "muli",
            OpCode::DivI => "divi",
            OpCode::AddF => "addf",
            OpCode::SubF => "subf",
            OpCode::MulF => "mulf",
            OpCode::DivF => "divf",
            OpCode::CmpLI => "cmpi_l",
            OpCode::CmpLeI => "cmpi_le",
            OpCode::CmpLF => "cmpf_l",
            OpCode::CmpLeF => "cmpf_le",
            OpCode::CastI => "casti",
            OpCode::CastF => "castf",
            OpCode::Call => "call",
            OpCode::Ret => "ret",
            OpCode::Jmp => "jmp",
            OpCode::Jz => "jz",
        }
    }
}
