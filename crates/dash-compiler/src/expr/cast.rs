//! Explicit conversions between integer and real.
//!
//! Only `int -> real` (`castf`) and `real -> int` (`casti`) exist. A value
//! in a temporary is converted in place; a named value is converted into a
//! fresh temporary so the variable keeps its value.

use dash_ast::CastExpr;
use dash_core::{CompilationError, TypeKind};

use super::{ExprCompiler, Result};
use crate::bytecode::OpCode;
use crate::expr_value::ExprValue;

pub fn compile_cast(compiler: &mut ExprCompiler<'_>, cast: &CastExpr<'_>) -> Result<ExprValue> {
    let value = compiler.generate(cast.value)?;

    let op = match (value.single_type(), cast.target) {
        (Some(TypeKind::Integer), TypeKind::Real) => OpCode::CastF,
        (Some(TypeKind::Real), TypeKind::Integer) => OpCode::CastI,
        _ => {
            return Err(CompilationError::InvalidCast {
                from: value.types,
                to: cast.target,
                span: cast.span,
            });
        }
    };

    let src = value.register;
    let dest = if compiler.regs().is_named(src) {
        compiler.push_temp(cast.span)?
    } else {
        compiler.regs().pop_temp_to(src);
        src
    };

    compiler.emitter().emit_cast(op, src, dest)?;
    Ok(ExprValue::single(dest, cast.target))
}
