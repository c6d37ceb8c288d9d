//! Bytecode types for the dash register VM.
//!
//! - [`OpCode`] - The instruction set
//! - [`Word`], [`Instruction`] - Bit-level encoding of one buffer slot
//! - [`BytecodeChunk`] - Compiled bytecode for a procedure or a whole VM

mod chunk;
mod opcode;
mod word;

pub use chunk::{BytecodeChunk, Decoded, Instructions};
pub use opcode::OpCode;
pub use word::{Instruction, Register, Word};
