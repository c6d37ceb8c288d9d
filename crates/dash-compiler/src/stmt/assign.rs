//! Assignment statements.
//!
//! `a, b = e...;` evaluates every value into a window before writing any
//! target, so `a, b = b, a` swaps.

use dash_ast::AssignStmt;
use dash_core::{CompilationError, TypeList};

use super::{Result, StmtCompiler};
use crate::expr::WindowKind;

impl<'a> StmtCompiler<'a> {
    pub fn compile_assign<'ast>(&mut self, assign: &AssignStmt<'ast>) -> Result<()> {
        let mut targets = Vec::with_capacity(assign.targets.len());
        let mut types = TypeList::with_capacity(assign.targets.len());
        for target in assign.targets {
            let binding =
                self.regs
                    .lookup(target.name)
                    .ok_or_else(|| CompilationError::UndefinedIdentifier {
                        name: target.name.to_string(),
                        span: target.span,
                    })?;
            targets.push(binding.register);
            types.push(binding.ty);
        }

        let base = self.expr_compiler().generate_window(
            assign.values,
            &types,
            WindowKind::Values("assignment"),
            assign.span,
        )?;

        for (slot, &target) in (base..).zip(&targets) {
            self.emitter.emit_move(slot, target)?;
        }
        Ok(())
    }
}
