//! Statement code generation.
//!
//! The [`StmtCompiler`] lowers statements of one procedure body:
//! - Blocks with lexical scoping
//! - Variable declarations and multi-target assignment
//! - Returns checked against the procedure's outputs
//! - If/else and while with break/continue
//!
//! Temporaries never survive a statement: every statement ends with the
//! temporary stack cleared.

mod assign;
mod block;
mod if_stmt;
mod return_stmt;
mod var_decl;
mod while_stmt;

use dash_ast::{Expr, ExprStmt, Stmt};
use dash_core::{CompilationError, TypeKind};

use crate::bytecode::Register;
use crate::emit::BytecodeEmitter;
use crate::expr::ExprCompiler;
use crate::registers::RegisterAllocator;
use crate::registry::ProcedureTable;

type Result<T> = std::result::Result<T, CompilationError>;

/// Compiles statements to bytecode.
pub struct StmtCompiler<'a> {
    /// Call targets
    procedures: &'a ProcedureTable,
    /// Register state of the current frame
    regs: &'a mut RegisterAllocator,
    /// Bytecode emitter
    emitter: &'a mut BytecodeEmitter,
    /// Output types of the procedure being compiled
    outputs: &'a [TypeKind],
}

impl<'a> StmtCompiler<'a> {
    pub fn new(
        procedures: &'a ProcedureTable,
        regs: &'a mut RegisterAllocator,
        emitter: &'a mut BytecodeEmitter,
        outputs: &'a [TypeKind],
    ) -> Self {
        Self {
            procedures,
            regs,
            emitter,
            outputs,
        }
    }

    /// Compile a statement.
    pub fn compile<'ast>(&mut self, stmt: &Stmt<'ast>) -> Result<()> {
        self.emitter.set_line(stmt.span().line);

        match stmt {
            Stmt::Expr(expr_stmt) => self.compile_expr_stmt(expr_stmt)?,
            Stmt::VarDecl(decl) => self.compile_var_decl(decl)?,
            Stmt::Assign(assign) => self.compile_assign(assign)?,
            Stmt::Return(ret) => self.compile_return(ret)?,
            Stmt::Break(brk) => self.emitter.emit_break(brk.span)?,
            Stmt::Continue(cont) => self.emitter.emit_continue(cont.span)?,
            Stmt::Block(block) => self.compile_block(block)?,
            Stmt::If(if_stmt) => self.compile_if(if_stmt)?,
            Stmt::While(while_stmt) => self.compile_while(while_stmt)?,
        }

        self.regs.clear_temps();
        Ok(())
    }

    /// Evaluate an expression for its side effects; the values are dropped.
    fn compile_expr_stmt<'ast>(&mut self, expr_stmt: &ExprStmt<'ast>) -> Result<()> {
        self.expr_compiler().generate(expr_stmt.expr)?;
        Ok(())
    }

    /// Evaluate a branch or loop condition, which must be a single int.
    fn compile_condition<'ast>(&mut self, condition: &Expr<'ast>) -> Result<Register> {
        let value = self.expr_compiler().generate(condition)?;
        match value.single_type() {
            Some(TypeKind::Integer) => Ok(value.register),
            _ => Err(CompilationError::InvalidCondition {
                found: value.types,
                span: condition.span(),
            }),
        }
    }

    fn expr_compiler(&mut self) -> ExprCompiler<'_> {
        ExprCompiler::new(self.procedures, self.regs, self.emitter)
    }
}
