//! Typed abstract syntax tree consumed by the dash code generator.
//!
//! The front end resolves every type before handing the tree over, so
//! nodes carry [`TypeKind`](dash_core::TypeKind) descriptors rather than
//! type expressions. All nodes live in a `bumpalo::Bump` arena and remain
//! valid for the arena's lifetime.

pub mod builder;
pub mod decl;
pub mod expr;
pub mod ops;
pub mod stmt;

pub use builder::AstBuilder;
pub use decl::*;
pub use expr::*;
pub use ops::*;
pub use stmt::*;
