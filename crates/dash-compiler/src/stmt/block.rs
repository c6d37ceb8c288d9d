//! Block statements.

use dash_ast::{Block, Stmt};

use super::{Result, StmtCompiler};

impl<'a> StmtCompiler<'a> {
    /// Compile a block in its own scope.
    ///
    /// Names declared inside are dropped at the closing brace and their
    /// registers become available again.
    pub fn compile_block<'ast>(&mut self, block: &Block<'ast>) -> Result<()> {
        self.regs.enter_scope();
        for stmt in block.stmts {
            self.compile(stmt)?;
        }
        self.regs.exit_scope();
        Ok(())
    }

    /// Compile a branch or loop body in its own scope, so a bare
    /// declaration cannot leak out of it.
    pub(crate) fn compile_scoped<'ast>(&mut self, stmt: &Stmt<'ast>) -> Result<()> {
        self.regs.enter_scope();
        self.compile(stmt)?;
        self.regs.exit_scope();
        Ok(())
    }
}
