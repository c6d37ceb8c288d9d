//! Expression AST nodes.
//!
//! Nodes are allocated in a `bumpalo::Bump` arena and borrow their children
//! from it. Binary, cast and call nodes carry the front end's estimate of
//! how many temporary registers their subtree needs; the code generator
//! uses it to pick an evaluation order.

use dash_core::{Span, TypeKind};

use crate::ops::BinaryOp;

/// An identifier with its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident<'ast> {
    pub name: &'ast str,
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }
}

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// Reference to a variable or parameter
    Variable(Ident<'ast>),
    /// Integer literal
    Integer(IntegerLiteral),
    /// Real literal
    Real(RealLiteral),
    /// Explicit conversion between integer and real
    Cast(&'ast CastExpr<'ast>),
    /// Arithmetic or comparison
    Binary(&'ast BinaryExpr<'ast>),
    /// Procedure call, possibly producing several values
    Call(&'ast CallExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    pub fn span(&self) -> Span {
        match self {
            Self::Variable(e) => e.span,
            Self::Integer(e) => e.span,
            Self::Real(e) => e.span,
            Self::Cast(e) => e.span,
            Self::Binary(e) => e.span,
            Self::Call(e) => e.span,
        }
    }

    /// Estimated number of temporaries needed to evaluate this subtree.
    ///
    /// Variables live in named registers and cost nothing; a literal needs
    /// exactly one temporary.
    pub fn temp_cost(&self) -> u32 {
        match self {
            Self::Variable(_) => 0,
            Self::Integer(_) | Self::Real(_) => 1,
            Self::Cast(e) => e.temp_cost,
            Self::Binary(e) => e.temp_cost,
            Self::Call(e) => e.temp_cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub value: i32,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealLiteral {
    pub value: f32,
    pub span: Span,
}

/// `value as target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastExpr<'ast> {
    pub value: &'ast Expr<'ast>,
    pub target: TypeKind,
    pub temp_cost: u32,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    pub left: &'ast Expr<'ast>,
    pub op: BinaryOp,
    pub right: &'ast Expr<'ast>,
    pub temp_cost: u32,
    pub span: Span,
}

/// `callee(args...)`.
///
/// Each argument expression may itself produce several values; together
/// they fill the callee's parameters in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    pub callee: Ident<'ast>,
    pub args: &'ast [Expr<'ast>],
    pub temp_cost: u32,
    pub span: Span,
}
