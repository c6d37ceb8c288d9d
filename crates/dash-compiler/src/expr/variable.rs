//! Variable references.
//!
//! A variable already lives in a named register, so no code is emitted.

use dash_ast::Ident;
use dash_core::CompilationError;

use super::{ExprCompiler, Result};
use crate::expr_value::ExprValue;

pub fn compile_variable(compiler: &mut ExprCompiler<'_>, ident: &Ident<'_>) -> Result<ExprValue> {
    let binding = compiler
        .regs()
        .lookup(ident.name)
        .ok_or_else(|| CompilationError::UndefinedIdentifier {
            name: ident.name.to_string(),
            span: ident.span,
        })?;
    Ok(ExprValue::single(binding.register, binding.ty))
}
