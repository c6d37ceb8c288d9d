//! Where an expression left its values.

use dash_core::{TypeKind, TypeList};

use crate::bytecode::Register;

/// Result of generating an expression.
///
/// The values sit in consecutive registers starting at `register`, one per
/// entry of `types`. A call with no outputs has an empty list and its
/// `register` must not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprValue {
    pub register: Register,
    pub types: TypeList,
}

impl ExprValue {
    pub fn new(register: Register, types: TypeList) -> Self {
        Self { register, types }
    }

    /// A single value of type `ty`.
    pub fn single(register: Register, ty: TypeKind) -> Self {
        Self {
            register,
            types: vec![ty],
        }
    }

    /// The type when there is exactly one value.
    pub fn single_type(&self) -> Option<TypeKind> {
        match self.types.as_slice() {
            [ty] => Some(*ty),
            _ => None,
        }
    }

    pub fn count(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
