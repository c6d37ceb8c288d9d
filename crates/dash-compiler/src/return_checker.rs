//! Return path verification for procedures with outputs.
//!
//! The check is syntactic: a statement always returns if it is a `return`,
//! a block containing a statement that always returns, or an if/else whose
//! branches both always return. Loops never count, since their condition
//! may be false on entry.

use dash_ast::{Block, Stmt};

pub fn block_always_returns(block: &Block<'_>) -> bool {
    block.stmts.iter().any(always_returns)
}

pub fn always_returns(stmt: &Stmt<'_>) -> bool {
    match stmt {
        Stmt::Return(_) => true,
        Stmt::Block(block) => block_always_returns(block),
        Stmt::If(if_stmt) => match if_stmt.else_stmt {
            Some(else_stmt) => always_returns(if_stmt.then_stmt) && always_returns(else_stmt),
            None => false,
        },
        Stmt::Expr(_)
        | Stmt::VarDecl(_)
        | Stmt::Assign(_)
        | Stmt::Break(_)
        | Stmt::Continue(_)
        | Stmt::While(_) => false,
    }
}
