//! Procedure calls.
//!
//! Arguments are evaluated into a window at the top of the stack and the
//! callee writes its outputs over the same window:
//!
//! ```text
//! before:  [ live ][ arg0 arg1 ... ]      call a=index b=base c=base
//! after:   [ live ][ out0 out1 ... ]
//!                  ^ base
//! ```

use dash_ast::CallExpr;
use dash_core::CompilationError;

use super::{ExprCompiler, Result, WindowKind};
use crate::expr_value::ExprValue;

pub fn compile_call(compiler: &mut ExprCompiler<'_>, call: &CallExpr<'_>) -> Result<ExprValue> {
    let name = call.callee.name;
    let procedures = compiler.procedures();
    let (index, entry) =
        procedures
            .lookup(name)
            .ok_or_else(|| CompilationError::CallTargetNotFound {
                name: name.to_string(),
                span: call.callee.span,
            })?;
    let index = u16::try_from(index).map_err(|_| CompilationError::MalformedAst {
        message: format!("procedure index {index} does not fit the call operand"),
        span: call.span,
    })?;

    let base =
        compiler.generate_window(call.args, &entry.params, WindowKind::Call(name), call.span)?;
    compiler.emitter().emit_call(index, base)?;

    // The callee consumed the arguments; its outputs now occupy the window.
    compiler.regs().release_from(base);
    for _ in &entry.outputs {
        compiler.push_temp(call.span)?;
    }

    Ok(ExprValue::new(base, entry.outputs.clone()))
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use dash_ast::{AstBuilder, BinaryOp};
    use dash_core::{ArityProblem, TypeKind};

    use super::*;
    use crate::bytecode::{Instruction, OpCode};
    use crate::testing::Fixture;

    const INT: TypeKind = TypeKind::Integer;
    const REAL: TypeKind = TypeKind::Real;

    #[test]
    fn nullary_call_leaves_one_temp() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::with_vars(&[("a", INT)])
            .proc("noise", &[], &[])
            .proc("seed", &[], &[INT]);

        let value = fx.expr().generate(&ast.call("seed", &[])).unwrap();

        assert_eq!(value, ExprValue::single(1, INT));
        assert_eq!(fx.instrs(), vec![Instruction::new(OpCode::Call, 1, 1, 1)]);
        assert_eq!(fx.regs.temp_count(), 1);
    }

    #[test]
    fn arguments_and_outputs_share_the_window() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::with_vars(&[("x", REAL)]).proc("scale", &[REAL, INT], &[REAL]);

        let value = fx
            .expr()
            .generate(&ast.call("scale", &[ast.var("x"), ast.int(3)]))
            .unwrap();

        assert_eq!(value, ExprValue::single(1, REAL));
        assert_eq!(
            fx.instrs(),
            vec![
                Instruction::new(OpCode::Mov, 0, 0, 1),
                Instruction::new(OpCode::Stor, 0, 0, 2),
                Instruction::new(OpCode::Call, 0, 1, 1),
            ]
        );
        assert_eq!(fx.regs.next_free_index(), 2);
    }

    #[test]
    fn multi_output_call_feeds_two_parameters() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new()
            .proc("pair", &[], &[INT, INT])
            .proc("add", &[INT, INT], &[INT]);

        let value = fx
            .expr()
            .generate(&ast.call("add", &[ast.call("pair", &[])]))
            .unwrap();

        assert_eq!(value, ExprValue::single(0, INT));
        assert_eq!(
            fx.instrs(),
            vec![
                Instruction::new(OpCode::Call, 0, 0, 0),
                Instruction::new(OpCode::Call, 1, 0, 0),
            ]
        );
    }

    #[test]
    fn outputs_can_outnumber_arguments() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new().proc("split", &[REAL], &[INT, REAL, INT]);

        let value = fx
            .expr()
            .generate(&ast.call("split", &[ast.real(1.5)]))
            .unwrap();

        assert_eq!(value.register, 0);
        assert_eq!(value.types, vec![INT, REAL, INT]);
        assert_eq!(fx.regs.temp_count(), 3);
    }

    #[test]
    fn argument_scratch_is_released() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new().proc("f", &[INT, INT], &[INT]);

        let heavy = ast.binary(
            ast.binary(ast.int(1), BinaryOp::Add, ast.int(2)),
            BinaryOp::Mul,
            ast.binary(ast.int(3), BinaryOp::Add, ast.int(4)),
        );
        fx.expr()
            .generate(&ast.call("f", &[ast.int(0), heavy]))
            .unwrap();

        assert_eq!(
            fx.instrs().last(),
            Some(&Instruction::new(OpCode::Call, 0, 0, 0))
        );
        assert_eq!(fx.regs.register_count(), 4);
        assert_eq!(fx.regs.temp_count(), 1);
    }

    #[test]
    fn arguments_to_nullary_procedure() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::with_vars(&[("x", INT)]).proc("f", &[], &[INT]);

        let err = fx
            .expr()
            .generate(&ast.call("f", &[ast.var("x")]))
            .unwrap_err();

        assert!(matches!(
            err,
            CompilationError::CallArityMismatch { ref callee, expected: 0, problem: ArityProblem::TooMany, .. }
                if callee == "f"
        ));
        assert!(fx.chunk().is_empty());
    }

    #[test]
    fn missing_arguments() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new().proc("f", &[INT, INT], &[]);

        let err = fx.expr().generate(&ast.call("f", &[ast.int(1)])).unwrap_err();
        assert!(matches!(
            err,
            CompilationError::CallArityMismatch { problem: ArityProblem::TooFew { found: 1 }, .. }
        ));
        assert!(!fx.chunk().opcodes().contains(&OpCode::Call));
    }

    #[test]
    fn argument_type_mismatch() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new().proc("f", &[INT], &[]);

        let arg = ast.real(0.5);
        let err = fx.expr().generate(&ast.call("f", &[arg])).unwrap_err();
        assert_eq!(
            err,
            CompilationError::CallTypeMismatch {
                callee: "f".into(),
                index: 0,
                expected: INT,
                found: REAL,
                span: arg.span(),
            }
        );
    }

    #[test]
    fn unknown_callee() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new();

        let err = fx.expr().generate(&ast.call("nowhere", &[])).unwrap_err();
        assert!(matches!(err, CompilationError::CallTargetNotFound { name, .. } if name == "nowhere"));
    }
}
