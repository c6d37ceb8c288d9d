//! Error types for code generation.
//!
//! Every generation step returns `Result<_, CompilationError>`. The first
//! error aborts the expression, then the statement, the procedure and
//! finally the module import; nothing is recovered locally.

use std::fmt;

use thiserror::Error;

use crate::span::Span;
use crate::types::{TypeKind, TypeList, display_types};

/// Which way a value list failed to line up with the types it must fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityProblem {
    /// The expected list ran out while values or expressions remained.
    TooMany,
    /// The expressions ran out after supplying `found` values.
    TooFew { found: usize },
    /// Expression number `index` produced no values at all.
    EmptyValue { index: usize },
}

impl fmt::Display for ArityProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityProblem::TooMany => f.write_str("too many values supplied"),
            ArityProblem::TooFew { found } => write!(f, "only {found} supplied"),
            ArityProblem::EmptyValue { index } => {
                write!(f, "expression {index} produces no values")
            }
        }
    }
}

/// Errors raised while lowering the typed AST to bytecode.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompilationError {
    /// A variable reference did not resolve to a binding.
    #[error("at {span}: undefined identifier '{name}'")]
    UndefinedIdentifier {
        /// The identifier as written.
        name: String,
        /// Where it was referenced.
        span: Span,
    },

    /// Cast of a composite value, a cast to a composite type, or a cast to
    /// the operand's own type.
    #[error("at {span}: invalid cast from {} to {to}", display_types(.from))]
    InvalidCast {
        from: TypeList,
        to: TypeKind,
        span: Span,
    },

    /// Binary operands that are composite, not single values, or mixed
    /// integer/real.
    #[error(
        "at {span}: invalid operands to '{op}': {} and {}",
        display_types(.left),
        display_types(.right)
    )]
    OperandTypeMismatch {
        /// Operator symbol.
        op: &'static str,
        left: TypeList,
        right: TypeList,
        span: Span,
    },

    /// The callee name is not in the procedure table.
    #[error("at {span}: call to unknown procedure '{name}'")]
    CallTargetNotFound { name: String, span: Span },

    /// Argument values do not line up with the callee's parameters.
    #[error("at {span}: invalid call to '{callee}', expected {expected} argument value(s): {problem}")]
    CallArityMismatch {
        callee: String,
        expected: usize,
        problem: ArityProblem,
        span: Span,
    },

    /// Argument value `index` has the wrong type for its parameter.
    #[error("at {span}: invalid call to '{callee}', argument {index} is {found}, expected {expected}")]
    CallTypeMismatch {
        callee: String,
        index: usize,
        expected: TypeKind,
        found: TypeKind,
        span: Span,
    },

    /// Values of a return, declaration or assignment do not line up with
    /// their targets.
    #[error("at {span}: invalid {context}, expected {expected} value(s): {problem}")]
    ValueCountMismatch {
        /// The construct, e.g. "return statement".
        context: &'static str,
        expected: usize,
        problem: ArityProblem,
        span: Span,
    },

    /// Value `index` of a return, declaration or assignment has the wrong type.
    #[error("at {span}: invalid {context}, value {index} is {found}, expected {expected}")]
    ValueTypeMismatch {
        context: &'static str,
        index: usize,
        expected: TypeKind,
        found: TypeKind,
        span: Span,
    },

    /// An `if`/`while` condition that is not a single integer.
    #[error("at {span}: condition must be a single int, found {}", display_types(.found))]
    InvalidCondition { found: TypeList, span: Span },

    /// A name declared twice in the same scope.
    #[error("at {span}: variable '{name}' redeclared in the same scope")]
    VariableRedeclaration { name: String, span: Span },

    /// Two procedures with the same name in the procedure table.
    #[error("at {span}: duplicate procedure '{name}'")]
    DuplicateDefinition { name: String, span: Span },

    /// A procedure with outputs whose body can fall off the end.
    #[error("at {span}: not all paths of '{name}' return a value")]
    MissingReturn { name: String, span: Span },

    /// The register file of the frame is full.
    #[error("at {span}: cannot allocate register, limit of {limit} reached")]
    RegisterExhausted { limit: u16, span: Span },

    /// The instruction buffer could not grow.
    #[error("cannot allocate bytecode, growth by {requested} word(s) failed")]
    EmitterAllocationFailed { requested: usize },

    /// The AST violates a structural rule the front end should have enforced.
    #[error("at {span}: internal error, {message}")]
    MalformedAst { message: String, span: Span },
}

impl CompilationError {
    /// Location of the offending construct.
    pub fn span(&self) -> Span {
        match self {
            CompilationError::UndefinedIdentifier { span, .. } => *span,
            CompilationError::InvalidCast { span, .. } => *span,
            CompilationError::OperandTypeMismatch { span, .. } => *span,
            CompilationError::CallTargetNotFound { span, .. } => *span,
            CompilationError::CallArityMismatch { span, .. } => *span,
            CompilationError::CallTypeMismatch { span, .. } => *span,
            CompilationError::ValueCountMismatch { span, .. } => *span,
            CompilationError::ValueTypeMismatch { span, .. } => *span,
            CompilationError::InvalidCondition { span, .. } => *span,
            CompilationError::VariableRedeclaration { span, .. } => *span,
            CompilationError::DuplicateDefinition { span, .. } => *span,
            CompilationError::MissingReturn { span, .. } => *span,
            CompilationError::RegisterExhausted { span, .. } => *span,
            CompilationError::EmitterAllocationFailed { .. } => Span::default(),
            CompilationError::MalformedAst { span, .. } => *span,
        }
    }

    /// Stable diagnostic code, printed as `error dsc0003: ...`.
    pub fn code(&self) -> &'static str {
        match self {
            CompilationError::UndefinedIdentifier { .. } => "dsc0001",
            CompilationError::InvalidCast { .. } => "dsc0002",
            CompilationError::OperandTypeMismatch { .. } => "dsc0003",
            CompilationError::CallTargetNotFound { .. } => "dsc0004",
            CompilationError::CallArityMismatch { .. } => "dsc0005",
            CompilationError::CallTypeMismatch { .. } => "dsc0006",
            CompilationError::ValueCountMismatch { .. } => "dsc0007",
            CompilationError::ValueTypeMismatch { .. } => "dsc0008",
            CompilationError::InvalidCondition { .. } => "dsc0009",
            CompilationError::VariableRedeclaration { .. } => "dsc0010",
            CompilationError::DuplicateDefinition { .. } => "dsc0011",
            CompilationError::MissingReturn { .. } => "dsc0012",
            CompilationError::RegisterExhausted { .. } => "dsc0100",
            CompilationError::EmitterAllocationFailed { .. } => "dsc0101",
            CompilationError::MalformedAst { .. } => "dsc0200",
        }
    }

    /// Whether this is a resource limit rather than a fault in the program.
    pub fn is_resource_limit(&self) -> bool {
        matches!(
            self,
            CompilationError::RegisterExhausted { .. }
                | CompilationError::EmitterAllocationFailed { .. }
        )
    }
}
