//! Integer and real literals.
//!
//! A literal is stored into a fresh temporary with `stor`; the immediate
//! word carries the literal's raw bits.

use dash_ast::{IntegerLiteral, RealLiteral};
use dash_core::TypeKind;

use super::{ExprCompiler, Result};
use crate::expr_value::ExprValue;

pub fn compile_integer(compiler: &mut ExprCompiler<'_>, lit: &IntegerLiteral) -> Result<ExprValue> {
    let dest = compiler.push_temp(lit.span)?;
    compiler.emitter().emit_store_int(dest, lit.value)?;
    Ok(ExprValue::single(dest, TypeKind::Integer))
}

pub fn compile_real(compiler: &mut ExprCompiler<'_>, lit: &RealLiteral) -> Result<ExprValue> {
    let dest = compiler.push_temp(lit.span)?;
    compiler.emitter().emit_store_real(dest, lit.value)?;
    Ok(ExprValue::single(dest, TypeKind::Real))
}
