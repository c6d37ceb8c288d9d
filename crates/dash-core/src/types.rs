//! Type descriptors shared by the AST and the code generator.

use std::fmt;

/// The type of a single value.
///
/// Composite types only take part in cast and assignment legality checks.
/// They are never valid operands to arithmetic or comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// 32-bit signed integer.
    Integer,
    /// IEEE-754 single precision.
    Real,
    /// User composite type, identified by the front end's type id.
    Composite(u32),
}

impl TypeKind {
    #[inline]
    pub fn is_integer(self) -> bool {
        matches!(self, TypeKind::Integer)
    }

    #[inline]
    pub fn is_real(self) -> bool {
        matches!(self, TypeKind::Real)
    }

    #[inline]
    pub fn is_composite(self) -> bool {
        matches!(self, TypeKind::Composite(_))
    }

    /// Integer or real.
    #[inline]
    pub fn is_primitive(self) -> bool {
        !self.is_composite()
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Integer => f.write_str("int"),
            TypeKind::Real => f.write_str("real"),
            TypeKind::Composite(id) => write!(f, "composite#{id}"),
        }
    }
}

/// Ordered types of the values an expression produces.
///
/// Element `i` describes the value held in the `i`-th register of the
/// result window.
pub type TypeList = Vec<TypeKind>;

/// Renders a type list as `(int, real)` for diagnostics.
pub fn display_types(types: &[TypeKind]) -> String {
    let inner = types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("({inner})")
}
