//! The VM side of compilation: one code buffer and one procedure table.

use dash_core::CompilationError;

use crate::bytecode::BytecodeChunk;
use crate::registry::ProcedureTable;

/// Everything a VM needs to run imported procedures.
#[derive(Debug, Default)]
pub struct VmContext {
    code: BytecodeChunk,
    procedures: ProcedureTable,
}

/// Sizes to roll a [`VmContext`] back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    code_len: usize,
    procedure_count: usize,
}

impl VmContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> &BytecodeChunk {
        &self.code
    }

    pub fn procedures(&self) -> &ProcedureTable {
        &self.procedures
    }

    pub fn procedures_mut(&mut self) -> &mut ProcedureTable {
        &mut self.procedures
    }

    /// Append a compiled chunk, returning the word offset it starts at.
    pub fn append_code(&mut self, chunk: &BytecodeChunk) -> Result<usize, CompilationError> {
        self.code
            .append(chunk)
            .map_err(|_| CompilationError::EmitterAllocationFailed {
                requested: chunk.len(),
            })
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            code_len: self.code.len(),
            procedure_count: self.procedures.len(),
        }
    }

    /// Discard code and procedures added since `checkpoint`.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.code.truncate(checkpoint.code_len);
        self.procedures.truncate(checkpoint.procedure_count);
    }
}
