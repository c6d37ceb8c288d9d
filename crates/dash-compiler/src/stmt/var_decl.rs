//! Variable declarations.
//!
//! `var a: int, b: real = e...;` evaluates the initialisers into a value
//! window at the named boundary and then promotes that window, so the
//! values become the variables without being copied. Without initialisers
//! primitive variables are zeroed.

use dash_ast::VarDeclStmt;
use dash_core::{TypeKind, TypeList};

use super::{Result, StmtCompiler};
use crate::expr::WindowKind;

impl<'a> StmtCompiler<'a> {
    pub fn compile_var_decl<'ast>(&mut self, decl: &VarDeclStmt<'ast>) -> Result<()> {
        let Some(init) = decl.init else {
            for var in decl.vars {
                let reg = self.regs.declare(var.name.name, var.ty, var.name.span)?;
                match var.ty {
                    TypeKind::Integer => self.emitter.emit_store_int(reg, 0)?,
                    TypeKind::Real => self.emitter.emit_store_real(reg, 0.0)?,
                    TypeKind::Composite(_) => {}
                }
            }
            return Ok(());
        };

        let types: TypeList = decl.vars.iter().map(|var| var.ty).collect();
        self.expr_compiler().generate_window(
            init,
            &types,
            WindowKind::Values("variable declaration"),
            decl.span,
        )?;

        self.regs.promote_temps(
            decl.vars
                .iter()
                .map(|var| (var.name.name, var.ty, var.name.span)),
        )
    }
}
