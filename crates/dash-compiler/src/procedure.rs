//! Procedure compiler for generating bytecode from procedure bodies.
//!
//! [`ProcedureCompiler`] compiles one declaration with a fresh register
//! allocator and emitter:
//!
//! - Parameters take registers `0..n` in declaration order
//! - The body is compiled statement by statement
//! - A procedure without outputs gets an implicit `ret` when it can fall
//!   off the end; one with outputs must return on every path
//!
//! The callee's frame starts at the caller's call window, so parameter `i`
//! is exactly argument value `i`.

use dash_ast::ProcDecl;
use dash_core::CompilationError;

use crate::bytecode::BytecodeChunk;
use crate::emit::BytecodeEmitter;
use crate::options::CodegenOptions;
use crate::registers::RegisterAllocator;
use crate::registry::ProcedureTable;
use crate::return_checker::block_always_returns;
use crate::stmt::StmtCompiler;

type Result<T> = std::result::Result<T, CompilationError>;

/// Output of compiling one procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledProcedure {
    pub chunk: BytecodeChunk,
    /// Size of the frame the VM must provide.
    pub register_count: u16,
}

pub struct ProcedureCompiler<'a> {
    /// Call targets; must already contain every procedure the body calls
    procedures: &'a ProcedureTable,
    options: CodegenOptions,
}

impl<'a> ProcedureCompiler<'a> {
    pub fn new(procedures: &'a ProcedureTable, options: CodegenOptions) -> Self {
        Self {
            procedures,
            options,
        }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    #[tracing::instrument(level = "debug", skip_all, fields(procedure = decl.name.name))]
    pub fn compile<'ast>(&self, decl: &ProcDecl<'ast>) -> Result<CompiledProcedure> {
        let mut regs = RegisterAllocator::new(self.options.register_limit);
        let mut emitter = BytecodeEmitter::with_capacity(self.options.initial_code_capacity);
        emitter.set_line(decl.span.line);

        for param in decl.params {
            regs.declare(param.name.name, param.ty, param.name.span)?;
        }

        let mut stmts = StmtCompiler::new(self.procedures, &mut regs, &mut emitter, decl.outputs);
        for stmt in decl.body.stmts {
            stmts.compile(stmt)?;
        }

        if !block_always_returns(&decl.body) {
            if !decl.outputs.is_empty() {
                return Err(CompilationError::MissingReturn {
                    name: decl.name.name.to_string(),
                    span: decl.span,
                });
            }
            emitter.emit_return(0, 0)?;
        }

        let compiled = CompiledProcedure {
            chunk: emitter.finish(),
            register_count: regs.register_count(),
        };
        tracing::debug!(
            words = compiled.chunk.len(),
            registers = compiled.register_count,
            "procedure compiled"
        );
        Ok(compiled)
    }
}
