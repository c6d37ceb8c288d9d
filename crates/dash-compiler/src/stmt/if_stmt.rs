//! If/else statements.

use dash_ast::IfStmt;

use super::{Result, StmtCompiler};

impl<'a> StmtCompiler<'a> {
    /// Compile an if statement with an optional else branch.
    ///
    /// Bytecode layout:
    /// ```text
    /// [condition]
    /// jz cond -> else
    /// [then]
    /// jmp -> end          (only with an else branch)
    /// else:
    /// [else]
    /// end:
    /// ```
    pub fn compile_if<'ast>(&mut self, if_stmt: &IfStmt<'ast>) -> Result<()> {
        let cond = self.compile_condition(if_stmt.condition)?;
        let else_jump = self.emitter.emit_jump_if_zero(cond)?;
        self.regs.clear_temps();

        self.compile_scoped(if_stmt.then_stmt)?;

        match if_stmt.else_stmt {
            Some(else_stmt) => {
                let end_jump = self.emitter.emit_jump()?;
                self.emitter.patch_jump(else_jump)?;
                self.compile_scoped(else_stmt)?;
                self.emitter.patch_jump(end_jump)
            }
            None => self.emitter.patch_jump(else_jump),
        }
    }
}
