//! Expression code generation.
//!
//! The [`ExprCompiler`] lowers one expression tree into register code and
//! reports where the values ended up as an [`ExprValue`]. Named registers
//! are read in place; every other value lands in a temporary taken from the
//! top of the allocator's stack. Operators try to overwrite an operand
//! register instead of taking a fresh one.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use dash_ast::{AstBuilder, BinaryOp};
//! use dash_compiler::bytecode::OpCode;
//! use dash_compiler::emit::BytecodeEmitter;
//! use dash_compiler::expr::ExprCompiler;
//! use dash_compiler::registers::RegisterAllocator;
//! use dash_compiler::registry::ProcedureTable;
//!
//! let arena = Bump::new();
//! let ast = AstBuilder::new(&arena);
//! let sum = ast.binary(ast.int(2), BinaryOp::Add, ast.int(3));
//!
//! let procedures = ProcedureTable::new();
//! let mut regs = RegisterAllocator::default();
//! let mut emitter = BytecodeEmitter::new();
//! let value = ExprCompiler::new(&procedures, &mut regs, &mut emitter)
//!     .generate(&sum)
//!     .unwrap();
//!
//! assert_eq!(value.register, 0);
//! emitter.finish().assert_opcodes(&[OpCode::Stor, OpCode::Stor, OpCode::AddI]);
//! ```

mod binary;
mod calls;
mod cast;
mod literals;
mod variable;
mod window;

use dash_ast::Expr;
use dash_core::{CompilationError, Span};

use crate::bytecode::Register;
use crate::emit::BytecodeEmitter;
use crate::expr_value::ExprValue;
use crate::registers::RegisterAllocator;
use crate::registry::ProcedureTable;

pub use window::WindowKind;

type Result<T> = std::result::Result<T, CompilationError>;

/// Generates code for expressions of one procedure.
pub struct ExprCompiler<'a> {
    /// Call targets, read-only while a body is compiled
    procedures: &'a ProcedureTable,
    /// Register state of the current frame
    regs: &'a mut RegisterAllocator,
    /// Bytecode emitter
    emitter: &'a mut BytecodeEmitter,
}

impl<'a> ExprCompiler<'a> {
    pub fn new(
        procedures: &'a ProcedureTable,
        regs: &'a mut RegisterAllocator,
        emitter: &'a mut BytecodeEmitter,
    ) -> Self {
        Self {
            procedures,
            regs,
            emitter,
        }
    }

    /// Generate code for `expr`, returning where its values are.
    pub fn generate<'ast>(&mut self, expr: &Expr<'ast>) -> Result<ExprValue> {
        match expr {
            Expr::Variable(ident) => variable::compile_variable(self, ident),
            Expr::Integer(lit) => literals::compile_integer(self, lit),
            Expr::Real(lit) => literals::compile_real(self, lit),
            Expr::Cast(cast) => cast::compile_cast(self, cast),
            Expr::Binary(bin) => binary::compile_binary(self, bin),
            Expr::Call(call) => calls::compile_call(self, call),
        }
    }

    /// Take a fresh temporary, blaming `span` if the frame is full.
    pub(crate) fn push_temp(&mut self, span: Span) -> Result<Register> {
        self.regs.push_temp().map_err(|e| e.at(span))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn procedures(&self) -> &'a ProcedureTable {
        self.procedures
    }

    pub fn regs(&mut self) -> &mut RegisterAllocator {
        self.regs
    }

    pub fn emitter(&mut self) -> &mut BytecodeEmitter {
        self.emitter
    }
}
