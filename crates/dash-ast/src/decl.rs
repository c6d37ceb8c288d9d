//! Procedure and module declarations.

use dash_core::{Span, TypeKind};

use crate::expr::Ident;
use crate::stmt::{Block, Declarator};

/// A procedure: named inputs, an ordered list of output types and a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcDecl<'ast> {
    pub name: Ident<'ast>,
    pub params: &'ast [Declarator<'ast>],
    pub outputs: &'ast [TypeKind],
    pub body: Block<'ast>,
    pub span: Span,
}

impl<'ast> ProcDecl<'ast> {
    /// Parameter types in declaration order.
    pub fn param_types(&self) -> impl Iterator<Item = TypeKind> + '_ {
        self.params.iter().map(|p| p.ty)
    }
}

/// The procedures of one compilation unit, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Module<'ast> {
    pub procs: &'ast [ProcDecl<'ast>],
    pub span: Span,
}

impl<'ast> Module<'ast> {
    pub fn new(procs: &'ast [ProcDecl<'ast>], span: Span) -> Self {
        Self { procs, span }
    }
}
