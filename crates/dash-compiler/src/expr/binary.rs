//! Arithmetic and comparison operators.
//!
//! The operand whose subtree needs more temporaries is generated first so
//! its scratch registers are released before the other side starts; ties
//! go left to right. The result overwrites an operand temporary when there
//! is one.

use dash_ast::{BinaryExpr, BinaryOp};
use dash_core::{CompilationError, TypeKind};

use super::{ExprCompiler, Result};
use crate::bytecode::OpCode;
use crate::expr_value::ExprValue;

pub fn compile_binary(compiler: &mut ExprCompiler<'_>, expr: &BinaryExpr<'_>) -> Result<ExprValue> {
    let left_first = expr.left.temp_cost() >= expr.right.temp_cost();
    let (left, right) = if left_first {
        let left = compiler.generate(expr.left)?;
        (left, compiler.generate(expr.right)?)
    } else {
        let right = compiler.generate(expr.right)?;
        (compiler.generate(expr.left)?, right)
    };

    let operand_ty = match (left.single_type(), right.single_type()) {
        (Some(l), Some(r)) if l == r && l.is_primitive() => l,
        _ => {
            return Err(CompilationError::OperandTypeMismatch {
                op: expr.op.as_str(),
                left: left.types,
                right: right.types,
                span: expr.span,
            });
        }
    };

    let (l, r) = (left.register, right.register);
    let named = (compiler.regs().is_named(l), compiler.regs().is_named(r));
    let dest = match named {
        (true, true) => compiler.push_temp(expr.span)?,
        (true, false) => r,
        (false, true) => l,
        (false, false) if left_first => l,
        (false, false) => r,
    };
    compiler.regs().pop_temp_to(dest);

    let (op, swap) = select_opcode(expr.op, operand_ty);
    let (a, b) = if swap { (r, l) } else { (l, r) };
    compiler.emitter().emit_binary(op, a, b, dest)?;

    let result_ty = if expr.op.is_comparison() {
        TypeKind::Integer
    } else {
        operand_ty
    };
    Ok(ExprValue::single(dest, result_ty))
}

/// Opcode for `op` on `ty` operands, and whether `a`/`b` must be swapped.
///
/// There is no greater-than; `x > y` is emitted as `y < x`.
fn select_opcode(op: BinaryOp, ty: TypeKind) -> (OpCode, bool) {
    let real = ty.is_real();
    let pick = |int_op, real_op| if real { real_op } else { int_op };
    match op {
        BinaryOp::Add => (pick(OpCode::AddI, OpCode::AddF), false),
        BinaryOp::Sub => (pick(OpCode::SubI, OpCode::SubF), false),
        BinaryOp::Mul => (pick(OpCode::MulI, OpCode::MulF), false),
        BinaryOp::Div => (pick(OpCode::DivI, OpCode::DivF), false),
        BinaryOp::Less => (pick(OpCode::CmpLI, OpCode::CmpLF), false),
        BinaryOp::LessEqual => (pick(OpCode::CmpLeI, OpCode::CmpLeF), false),
        BinaryOp::Greater => (pick(OpCode::CmpLI, OpCode::CmpLF), true),
        BinaryOp::GreaterEqual => (pick(OpCode::CmpLeI, OpCode::CmpLeF), true),
    }
}
