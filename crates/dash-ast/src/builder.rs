//! Arena-backed construction of typed ASTs.
//!
//! [`AstBuilder`] is what a front end (or a test) uses to produce trees the
//! code generator accepts. It fills in the temporary-register cost of every
//! node it builds:
//!
//! - binary: `max(l, r)` when the sides differ, `l + 1` when they tie
//! - cast: `max(1, operand)`
//! - call: `max(1, argument count, costliest argument)`
//!
//! Each node gets its own column on line 1 so diagnostics can tell nodes
//! apart.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use dash_ast::{AstBuilder, BinaryOp};
//!
//! let arena = Bump::new();
//! let ast = AstBuilder::new(&arena);
//! let sum = ast.binary(ast.int(2), BinaryOp::Add, ast.int(3));
//! assert_eq!(sum.temp_cost(), 2);
//! ```

use std::cell::Cell;

use bumpalo::Bump;
use dash_core::{Span, TypeKind};

use crate::decl::{Module, ProcDecl};
use crate::expr::{BinaryExpr, CallExpr, CastExpr, Expr, Ident, IntegerLiteral, RealLiteral};
use crate::ops::BinaryOp;
use crate::stmt::{
    AssignStmt, Block, BreakStmt, ContinueStmt, Declarator, ExprStmt, IfStmt, ReturnStmt, Stmt,
    VarDeclStmt, WhileStmt,
};

/// Builds AST nodes into a bump arena.
pub struct AstBuilder<'ast> {
    arena: &'ast Bump,
    next_col: Cell<u32>,
}

impl<'ast> AstBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            next_col: Cell::new(1),
        }
    }

    pub fn arena(&self) -> &'ast Bump {
        self.arena
    }

    fn span(&self) -> Span {
        let col = self.next_col.get();
        self.next_col.set(col + 1);
        Span::point(1, col)
    }

    fn ident(&self, name: &str) -> Ident<'ast> {
        Ident::new(self.arena.alloc_str(name), self.span())
    }

    // ==========================================================================
    // Expressions
    // ==========================================================================

    pub fn var(&self, name: &str) -> Expr<'ast> {
        Expr::Variable(self.ident(name))
    }

    pub fn int(&self, value: i32) -> Expr<'ast> {
        Expr::Integer(IntegerLiteral {
            value,
            span: self.span(),
        })
    }

    pub fn real(&self, value: f32) -> Expr<'ast> {
        Expr::Real(RealLiteral {
            value,
            span: self.span(),
        })
    }

    pub fn cast(&self, value: Expr<'ast>, target: TypeKind) -> Expr<'ast> {
        let temp_cost = value.temp_cost().max(1);
        Expr::Cast(self.arena.alloc(CastExpr {
            value: self.arena.alloc(value),
            target,
            temp_cost,
            span: self.span(),
        }))
    }

    pub fn binary(&self, left: Expr<'ast>, op: BinaryOp, right: Expr<'ast>) -> Expr<'ast> {
        let (l, r) = (left.temp_cost(), right.temp_cost());
        let temp_cost = if l == r { l + 1 } else { l.max(r) };
        self.binary_with_cost(left, op, right, temp_cost)
    }

    /// A binary node with an explicit cost, for front ends that estimate
    /// differently.
    pub fn binary_with_cost(
        &self,
        left: Expr<'ast>,
        op: BinaryOp,
        right: Expr<'ast>,
        temp_cost: u32,
    ) -> Expr<'ast> {
        Expr::Binary(self.arena.alloc(BinaryExpr {
            left: self.arena.alloc(left),
            op,
            right: self.arena.alloc(right),
            temp_cost,
            span: self.span(),
        }))
    }

    pub fn call(&self, callee: &str, args: &[Expr<'ast>]) -> Expr<'ast> {
        let temp_cost = args
            .iter()
            .map(Expr::temp_cost)
            .max()
            .unwrap_or(0)
            .max(args.len() as u32)
            .max(1);
        Expr::Call(self.arena.alloc(CallExpr {
            callee: self.ident(callee),
            args: self.arena.alloc_slice_copy(args),
            temp_cost,
            span: self.span(),
        }))
    }

    // ==========================================================================
    // Statements
    // ==========================================================================

    pub fn expr_stmt(&self, expr: Expr<'ast>) -> Stmt<'ast> {
        Stmt::Expr(ExprStmt {
            expr: self.arena.alloc(expr),
            span: self.span(),
        })
    }

    pub fn declarators(&self, vars: &[(&str, TypeKind)]) -> &'ast [Declarator<'ast>] {
        let vars: Vec<_> = vars
            .iter()
            .map(|&(name, ty)| Declarator {
                name: self.ident(name),
                ty,
            })
            .collect();
        self.arena.alloc_slice_copy(&vars)
    }

    pub fn var_decl(&self, vars: &[(&str, TypeKind)], init: Option<&[Expr<'ast>]>) -> Stmt<'ast> {
        Stmt::VarDecl(VarDeclStmt {
            vars: self.declarators(vars),
            init: init.map(|values| -> &'ast [Expr<'ast>] {
                self.arena.alloc_slice_copy(values)
            }),
            span: self.span(),
        })
    }

    pub fn assign(&self, targets: &[&str], values: &[Expr<'ast>]) -> Stmt<'ast> {
        let targets: Vec<_> = targets.iter().map(|name| self.ident(name)).collect();
        Stmt::Assign(AssignStmt {
            targets: self.arena.alloc_slice_copy(&targets),
            values: self.arena.alloc_slice_copy(values),
            span: self.span(),
        })
    }

    pub fn ret(&self, values: &[Expr<'ast>]) -> Stmt<'ast> {
        Stmt::Return(ReturnStmt {
            values: self.arena.alloc_slice_copy(values),
            span: self.span(),
        })
    }

    pub fn brk(&self) -> Stmt<'ast> {
        Stmt::Break(BreakStmt { span: self.span() })
    }

    pub fn cont(&self) -> Stmt<'ast> {
        Stmt::Continue(ContinueStmt { span: self.span() })
    }

    pub fn block(&self, stmts: &[Stmt<'ast>]) -> Block<'ast> {
        Block {
            stmts: self.arena.alloc_slice_copy(stmts),
            span: self.span(),
        }
    }

    pub fn block_stmt(&self, stmts: &[Stmt<'ast>]) -> Stmt<'ast> {
        Stmt::Block(self.block(stmts))
    }

    pub fn if_stmt(
        &self,
        condition: Expr<'ast>,
        then_stmt: Stmt<'ast>,
        else_stmt: Option<Stmt<'ast>>,
    ) -> Stmt<'ast> {
        Stmt::If(self.arena.alloc(IfStmt {
            condition: self.arena.alloc(condition),
            then_stmt: self.arena.alloc(then_stmt),
            else_stmt: else_stmt.map(|s| -> &'ast Stmt<'ast> { self.arena.alloc(s) }),
            span: self.span(),
        }))
    }

    pub fn while_stmt(&self, condition: Expr<'ast>, body: Stmt<'ast>) -> Stmt<'ast> {
        Stmt::While(self.arena.alloc(WhileStmt {
            condition: self.arena.alloc(condition),
            body: self.arena.alloc(body),
            span: self.span(),
        }))
    }

    // ==========================================================================
    // Declarations
    // ==========================================================================

    pub fn proc_decl(
        &self,
        name: &str,
        params: &[(&str, TypeKind)],
        outputs: &[TypeKind],
        body: &[Stmt<'ast>],
    ) -> ProcDecl<'ast> {
        ProcDecl {
            name: self.ident(name),
            params: self.declarators(params),
            outputs: self.arena.alloc_slice_copy(outputs),
            body: self.block(body),
            span: self.span(),
        }
    }

    pub fn module(&self, procs: &[ProcDecl<'ast>]) -> Module<'ast> {
        Module::new(self.arena.alloc_slice_copy(procs), self.span())
    }
}
