//! Value windows: consecutive registers filled from a list of expressions.
//!
//! Calls, returns, declarations and assignments all need the values of an
//! expression list laid out in order and checked against a list of types.
//! One expression may produce several values, so the walk pairs values with
//! expected types one at a time rather than expression by expression.
//!
//! ```text
//!   base        slot
//!    ├── filled ──┼── scratch of the current expression ──┤
//! ```
//!
//! After each expression the scratch above its first slot is released and
//! its values are claimed slot by slot, moving only what is not already in
//! place. Values never move upwards, so the moves cannot clobber each other.

use dash_ast::Expr;
use dash_core::{ArityProblem, CompilationError, Span, TypeKind};

use super::{ExprCompiler, Result};
use crate::bytecode::Register;

/// What a window feeds, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind<'n> {
    /// Arguments of a call to the named procedure.
    Call(&'n str),
    /// Values of another construct, e.g. "return statement".
    Values(&'static str),
}

impl WindowKind<'_> {
    fn arity(self, expected: usize, problem: ArityProblem, span: Span) -> CompilationError {
        match self {
            WindowKind::Call(callee) => CompilationError::CallArityMismatch {
                callee: callee.to_string(),
                expected,
                problem,
                span,
            },
            WindowKind::Values(context) => CompilationError::ValueCountMismatch {
                context,
                expected,
                problem,
                span,
            },
        }
    }

    fn mismatch(
        self,
        index: usize,
        expected: TypeKind,
        found: TypeKind,
        span: Span,
    ) -> CompilationError {
        match self {
            WindowKind::Call(callee) => CompilationError::CallTypeMismatch {
                callee: callee.to_string(),
                index,
                expected,
                found,
                span,
            },
            WindowKind::Values(context) => CompilationError::ValueTypeMismatch {
                context,
                index,
                expected,
                found,
                span,
            },
        }
    }
}

impl ExprCompiler<'_> {
    /// Evaluate `exprs` into a window of `expected.len()` temporaries at the
    /// top of the stack, returning the window's first register.
    ///
    /// On success exactly the window is left on the temporary stack above
    /// whatever was live before.
    #[tracing::instrument(level = "trace", skip_all, fields(kind = ?kind, values = expected.len()))]
    pub fn generate_window<'ast>(
        &mut self,
        exprs: &[Expr<'ast>],
        expected: &[TypeKind],
        kind: WindowKind<'_>,
        span: Span,
    ) -> Result<Register> {
        let base = self.regs().next_free_index();

        // Nothing is evaluated when the shapes cannot possibly match.
        if expected.is_empty() && !exprs.is_empty() {
            return Err(kind.arity(0, ArityProblem::TooMany, span));
        }
        if exprs.is_empty() && !expected.is_empty() {
            return Err(kind.arity(expected.len(), ArityProblem::TooFew { found: 0 }, span));
        }

        let mut consumed = 0usize;
        for (index, expr) in exprs.iter().enumerate() {
            let value = self.generate(expr)?;
            if value.is_empty() {
                return Err(kind.arity(
                    expected.len(),
                    ArityProblem::EmptyValue { index },
                    expr.span(),
                ));
            }

            let slot = self.regs().next_free_index().min(base + consumed as Register);
            self.regs().release_from(slot);

            for (offset, &found) in value.types.iter().enumerate() {
                let Some(&want) = expected.get(consumed) else {
                    return Err(kind.arity(expected.len(), ArityProblem::TooMany, expr.span()));
                };
                if found != want {
                    return Err(kind.mismatch(consumed, want, found, expr.span()));
                }

                let dest = self.push_temp(expr.span())?;
                let src = value.register + offset as Register;
                if src != dest {
                    self.emitter().emit_move(src, dest)?;
                }
                consumed += 1;
            }
        }

        if consumed < expected.len() {
            return Err(kind.arity(
                expected.len(),
                ArityProblem::TooFew { found: consumed },
                span,
            ));
        }

        tracing::trace!(base, values = consumed, "window filled");
        Ok(base)
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use dash_ast::{AstBuilder, BinaryOp};

    use super::*;
    use crate::bytecode::{Instruction, OpCode};
    use crate::testing::Fixture;

    const INT: TypeKind = TypeKind::Integer;
    const REAL: TypeKind = TypeKind::Real;

    #[test]
    fn literals_land_in_place() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::with_vars(&[("a", INT)]);

        let base = fx
            .expr()
            .generate_window(
                &[ast.int(1), ast.real(2.0)],
                &[INT, REAL],
                WindowKind::Values("return statement"),
                Default::default(),
            )
            .unwrap();

        assert_eq!(base, 1);
        fx.chunk().assert_opcodes(&[OpCode::Stor, OpCode::Stor]);
        assert_eq!(fx.regs.temp_count(), 2);
    }

    #[test]
    fn named_values_are_copied() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::with_vars(&[("a", INT), ("b", INT)]);

        fx.expr()
            .generate_window(
                &[ast.var("b"), ast.var("a")],
                &[INT, INT],
                WindowKind::Call("f"),
                Default::default(),
            )
            .unwrap();

        assert_eq!(
            fx.instrs(),
            vec![
                Instruction::new(OpCode::Mov, 1, 0, 2),
                Instruction::new(OpCode::Mov, 0, 0, 3),
            ]
        );
    }

    #[test]
    fn scratch_is_reclaimed_between_values() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new();

        let sum = ast.binary(ast.int(1), BinaryOp::Add, ast.int(2));
        fx.expr()
            .generate_window(
                &[sum, sum],
                &[INT, INT],
                WindowKind::Values("assignment"),
                Default::default(),
            )
            .unwrap();

        // The second sum starts right above the first result.
        assert_eq!(fx.instrs()[5], Instruction::new(OpCode::AddI, 1, 2, 1));
        assert_eq!(fx.regs.temp_count(), 2);
        assert_eq!(fx.regs.register_count(), 3);
    }

    #[test]
    fn one_expression_fills_several_slots() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new().proc("pair", &[], &[INT, REAL]);

        let base = fx
            .expr()
            .generate_window(
                &[ast.call("pair", &[])],
                &[INT, REAL],
                WindowKind::Values("variable declaration"),
                Default::default(),
            )
            .unwrap();

        assert_eq!(base, 0);
        fx.chunk().assert_opcodes(&[OpCode::Call]);
    }

    #[test]
    fn type_error_names_value_index() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new().proc("pair", &[], &[INT, INT]);

        let err = fx
            .expr()
            .generate_window(
                &[ast.call("pair", &[])],
                &[INT, REAL],
                WindowKind::Values("return statement"),
                Default::default(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CompilationError::ValueTypeMismatch {
                context: "return statement",
                index: 1,
                expected: REAL,
                found: INT,
                ..
            }
        ));
    }

    #[test]
    fn values_left_over() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new().proc("pair", &[], &[INT, INT]);

        let err = fx
            .expr()
            .generate_window(
                &[ast.call("pair", &[])],
                &[INT],
                WindowKind::Values("assignment"),
                Default::default(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CompilationError::ValueCountMismatch { problem: ArityProblem::TooMany, expected: 1, .. }
        ));
    }

    // The extra expression is generated before the error is raised; only
    // the error kind is pinned here.
    #[test]
    fn expressions_left_over_after_exact_fill() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new().proc("pair", &[], &[INT, INT]);

        let err = fx
            .expr()
            .generate_window(
                &[ast.call("pair", &[]), ast.int(3)],
                &[INT, INT],
                WindowKind::Call("f"),
                Default::default(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CompilationError::CallArityMismatch { problem: ArityProblem::TooMany, .. }
        ));
    }

    #[test]
    fn too_few_values() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new();

        let err = fx
            .expr()
            .generate_window(
                &[ast.int(1)],
                &[INT, INT, INT],
                WindowKind::Call("f"),
                Default::default(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CompilationError::CallArityMismatch {
                expected: 3,
                problem: ArityProblem::TooFew { found: 1 },
                ..
            }
        ));
    }

    #[test]
    fn empty_value_is_an_arity_error() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new().proc("tick", &[], &[]);

        let err = fx
            .expr()
            .generate_window(
                &[ast.int(1), ast.call("tick", &[])],
                &[INT, INT],
                WindowKind::Call("f"),
                Default::default(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CompilationError::CallArityMismatch { problem: ArityProblem::EmptyValue { index: 1 }, .. }
        ));
    }

    #[test]
    fn shape_errors_emit_nothing() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new();

        let err = fx
            .expr()
            .generate_window(&[ast.int(1)], &[], WindowKind::Call("f"), Default::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CompilationError::CallArityMismatch { problem: ArityProblem::TooMany, expected: 0, .. }
        ));

        let err = fx
            .expr()
            .generate_window(&[], &[INT], WindowKind::Call("f"), Default::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CompilationError::CallArityMismatch { problem: ArityProblem::TooFew { found: 0 }, .. }
        ));
        assert!(fx.chunk().is_empty());
    }

    #[test]
    fn empty_window() {
        let mut fx = Fixture::with_vars(&[("a", INT)]);
        let base = fx
            .expr()
            .generate_window(&[], &[], WindowKind::Values("return statement"), Default::default())
            .unwrap();
        assert_eq!(base, 1);
        assert_eq!(fx.regs.temp_count(), 0);
    }
}
