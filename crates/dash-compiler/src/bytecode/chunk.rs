//! Bytecode chunk for a compiled procedure (or a whole VM code buffer).
//!
//! A `BytecodeChunk` is an ordered sequence of [`Word`]s with a parallel
//! table of source lines. Addresses are word indices.

use std::collections::TryReserveError;
use std::fmt;

use super::{Instruction, OpCode, Word};

/// A chunk of compiled bytecode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BytecodeChunk {
    /// Instruction and immediate words.
    words: Vec<Word>,
    /// Source line for each word.
    lines: Vec<u32>,
}

/// An instruction located in a chunk, with its immediate word if it has one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoded {
    pub offset: usize,
    pub instr: Instruction,
    pub imm: Option<Word>,
}

impl Decoded {
    /// Absolute target of a `jmp`/`jz`; offsets are relative to the word
    /// after the immediate.
    pub fn jump_target(&self) -> Option<usize> {
        match self.instr.op {
            OpCode::Jmp | OpCode::Jz => {
                let rel = self.imm?.as_int() as isize;
                Some((self.offset as isize + 2 + rel) as usize)
            }
            _ => None,
        }
    }
}

impl BytecodeChunk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: Vec::with_capacity(capacity),
            lines: Vec::with_capacity(capacity),
        }
    }

    /// Append `n` zeroed words tagged with `line` and hand them back.
    ///
    /// When the buffer is full its capacity at least doubles, so appends are
    /// amortised O(1). Allocation failure is returned, never aborted on.
    pub(crate) fn grow(&mut self, n: usize, line: u32) -> Result<&mut [Word], TryReserveError> {
        let start = self.words.len();
        if start + n > self.words.capacity() {
            let additional = n.max(start);
            self.words.try_reserve_exact(additional)?;
            self.lines.try_reserve_exact(additional)?;
        }
        self.words.resize(start + n, Word::ZERO);
        self.lines.resize(start + n, line);
        Ok(&mut self.words[start..])
    }

    /// Append another chunk, returning the offset it starts at.
    pub fn append(&mut self, other: &BytecodeChunk) -> Result<usize, TryReserveError> {
        let entry = self.words.len();
        self.words.try_reserve(other.words.len())?;
        self.lines.try_reserve(other.lines.len())?;
        self.words.extend_from_slice(&other.words);
        self.lines.extend_from_slice(&other.lines);
        Ok(entry)
    }

    /// Drop every word from `len` on.
    pub fn truncate(&mut self, len: usize) {
        self.words.truncate(len);
        self.lines.truncate(len);
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub(crate) fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    pub fn word(&self, offset: usize) -> Option<Word> {
        self.words.get(offset).copied()
    }

    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    pub fn line_at(&self, offset: usize) -> Option<u32> {
        self.lines.get(offset).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Walk the chunk instruction by instruction.
    ///
    /// Stops at the first word that does not decode.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            words: &self.words,
            offset: 0,
        }
    }

    /// All opcodes in order, skipping operands and immediates.
    pub fn opcodes(&self) -> Vec<OpCode> {
        self.instructions().map(|d| d.instr.op).collect()
    }

    /// Check that the chunk holds exactly the given opcode sequence.
    #[track_caller]
    pub fn assert_opcodes(&self, expected: &[OpCode]) {
        let actual = self.opcodes();
        assert_eq!(
            actual,
            expected,
            "Bytecode mismatch.\nExpected: {:?}\nActual:   {:?}",
            expected.iter().map(|op| op.name()).collect::<Vec<_>>(),
            actual.iter().map(|op| op.name()).collect::<Vec<_>>(),
        );
    }

    /// Check that the given opcodes appear in order, not necessarily adjacent.
    #[track_caller]
    pub fn assert_contains_opcodes(&self, expected: &[OpCode]) {
        let actual = self.opcodes();
        let mut remaining = expected.iter().peekable();
        for op in &actual {
            if remaining.peek() == Some(&op) {
                remaining.next();
            }
        }

        if remaining.peek().is_some() {
            panic!(
                "Missing opcodes in sequence.\nExpected to find: {:?}\nActual bytecode:  {:?}",
                remaining.map(|op| op.name()).collect::<Vec<_>>(),
                actual.iter().map(|op| op.name()).collect::<Vec<_>>(),
            );
        }
    }
}

/// Iterator returned by [`BytecodeChunk::instructions`].
pub struct Instructions<'a> {
    words: &'a [Word],
    offset: usize,
}

impl Iterator for Instructions<'_> {
    type Item = Decoded;

    fn next(&mut self) -> Option<Decoded> {
        let word = *self.words.get(self.offset)?;
        let instr = Instruction::decode(word)?;
        let imm = if instr.op.has_immediate() {
            Some(*self.words.get(self.offset + 1)?)
        } else {
            None
        };
        let decoded = Decoded {
            offset: self.offset,
            instr,
            imm,
        };
        self.offset += instr.op.width();
        Some(decoded)
    }
}

impl fmt::Display for BytecodeChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.instructions() {
            let Instruction { op, a, b, c } = d.instr;
            write!(f, "{:04}  {:<8}", d.offset, op.name())?;
            match op {
                OpCode::Nop => {}
                OpCode::Stor => {
                    let bits = d.imm.map(Word::imm_bits).unwrap_or_default();
                    write!(f, "r{c}, #{bits:#010x}")?;
                }
                OpCode::Mov | OpCode::CastI | OpCode::CastF => write!(f, "r{c}, r{a}")?,
                OpCode::Call => write!(f, "proc{a}, r{b} -> r{c}")?,
                OpCode::Ret => write!(f, "r{a}, {b}")?,
                OpCode::Jmp => write!(f, "-> {:04}", d.jump_target().unwrap_or_default())?,
                OpCode::Jz => write!(f, "r{a} -> {:04}", d.jump_target().unwrap_or_default())?,
                _ => write!(f, "r{c}, r{a}, r{b}")?,
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
