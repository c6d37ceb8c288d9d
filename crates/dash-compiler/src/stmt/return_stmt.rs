//! Return statements.
//!
//! The returned values are laid out in a window checked against the
//! procedure's outputs; `ret` hands the window to the caller, which finds
//! the values at its own call window.

use dash_ast::ReturnStmt;
use dash_core::CompilationError;

use super::{Result, StmtCompiler};
use crate::expr::WindowKind;

impl<'a> StmtCompiler<'a> {
    pub fn compile_return<'ast>(&mut self, ret: &ReturnStmt<'ast>) -> Result<()> {
        let outputs = self.outputs;
        let count = u16::try_from(outputs.len()).map_err(|_| CompilationError::MalformedAst {
            message: format!("{} return values do not fit the ret operand", outputs.len()),
            span: ret.span,
        })?;

        let base = self.expr_compiler().generate_window(
            ret.values,
            outputs,
            WindowKind::Values("return statement"),
            ret.span,
        )?;
        self.emitter.emit_return(base, count)
    }
}
