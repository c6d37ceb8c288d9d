//! Shared setup for unit tests.

use dash_core::TypeKind;

use crate::bytecode::{BytecodeChunk, Instruction, Word};
use crate::emit::BytecodeEmitter;
use crate::expr::ExprCompiler;
use crate::registers::RegisterAllocator;
use crate::registry::ProcedureTable;
use crate::stmt::StmtCompiler;

/// One procedure's worth of compiler state.
pub(crate) struct Fixture {
    pub procedures: ProcedureTable,
    pub regs: RegisterAllocator,
    pub emitter: BytecodeEmitter,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_limit(256)
    }

    pub fn with_limit(limit: u16) -> Self {
        Self {
            procedures: ProcedureTable::new(),
            regs: RegisterAllocator::new(limit),
            emitter: BytecodeEmitter::new(),
        }
    }

    /// Fixture with `vars` bound to registers 0, 1, ...
    pub fn with_vars(vars: &[(&str, TypeKind)]) -> Self {
        let mut fixture = Self::new();
        for &(name, ty) in vars {
            fixture
                .regs
                .declare(name, ty, Default::default())
                .unwrap();
        }
        fixture
    }

    pub fn proc(mut self, name: &str, params: &[TypeKind], outputs: &[TypeKind]) -> Self {
        self.procedures.declare(name, params, outputs).unwrap();
        self
    }

    pub fn expr(&mut self) -> ExprCompiler<'_> {
        ExprCompiler::new(&self.procedures, &mut self.regs, &mut self.emitter)
    }

    pub fn stmt<'s>(&'s mut self, outputs: &'s [TypeKind]) -> StmtCompiler<'s> {
        StmtCompiler::new(&self.procedures, &mut self.regs, &mut self.emitter, outputs)
    }

    pub fn chunk(&self) -> &BytecodeChunk {
        self.emitter.chunk()
    }

    pub fn instrs(&self) -> Vec<Instruction> {
        self.chunk().instructions().map(|d| d.instr).collect()
    }

    pub fn immediates(&self) -> Vec<Word> {
        self.chunk().instructions().filter_map(|d| d.imm).collect()
    }
}
