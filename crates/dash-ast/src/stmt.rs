//! Statement AST nodes.

use dash_core::{Span, TypeKind};

use crate::expr::{Expr, Ident};

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// Expression evaluated for its side effects (`f(x);`)
    Expr(ExprStmt<'ast>),
    /// `var a: int, b: real = e...;`
    VarDecl(VarDeclStmt<'ast>),
    /// `a, b = e...;`
    Assign(AssignStmt<'ast>),
    /// `return e...;`
    Return(ReturnStmt<'ast>),
    /// `break;`
    Break(BreakStmt),
    /// `continue;`
    Continue(ContinueStmt),
    /// `{ ... }`
    Block(Block<'ast>),
    /// `if cond { ... } else { ... }`
    If(&'ast IfStmt<'ast>),
    /// `while cond { ... }`
    While(&'ast WhileStmt<'ast>),
}

impl<'ast> Stmt<'ast> {
    pub fn span(&self) -> Span {
        match self {
            Self::Expr(s) => s.span,
            Self::VarDecl(s) => s.span,
            Self::Assign(s) => s.span,
            Self::Return(s) => s.span,
            Self::Break(s) => s.span,
            Self::Continue(s) => s.span,
            Self::Block(s) => s.span,
            Self::If(s) => s.span,
            Self::While(s) => s.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprStmt<'ast> {
    pub expr: &'ast Expr<'ast>,
    pub span: Span,
}

/// One `name: type` entry of a declaration or parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declarator<'ast> {
    pub name: Ident<'ast>,
    pub ty: TypeKind,
}

/// Declares one or more variables.
///
/// With an initializer the values of `init` fill the declarators in order,
/// so a single multi-value call may initialize several variables. Without
/// one, primitives start at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarDeclStmt<'ast> {
    pub vars: &'ast [Declarator<'ast>],
    pub init: Option<&'ast [Expr<'ast>]>,
    pub span: Span,
}

/// Assigns the values of `values` to `targets` in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignStmt<'ast> {
    pub targets: &'ast [Ident<'ast>],
    pub values: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStmt<'ast> {
    pub values: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinueStmt {
    pub span: Span,
}

/// A lexical scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<'ast> {
    pub stmts: &'ast [Stmt<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    pub condition: &'ast Expr<'ast>,
    pub then_stmt: &'ast Stmt<'ast>,
    pub else_stmt: Option<&'ast Stmt<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileStmt<'ast> {
    pub condition: &'ast Expr<'ast>,
    pub body: &'ast Stmt<'ast>,
    pub span: Span,
}
