//! Core types shared by the dash AST and code generator.
//!
//! - [`Span`]: source locations
//! - [`TypeKind`] / [`TypeList`]: type descriptors
//! - [`CompilationError`]: the structured error every generation step returns

mod error;
mod span;
mod types;

pub use error::{ArityProblem, CompilationError};
pub use span::Span;
pub use types::{TypeKind, TypeList, display_types};
