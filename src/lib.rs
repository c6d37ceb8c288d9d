//! dash: a register bytecode code generator for a small typed language.
//!
//! The crate ties the workspace together:
//!
//! - [`dash_core`]: spans, type descriptors and [`CompilationError`]
//! - [`dash_ast`]: the arena-allocated typed AST and its [`AstBuilder`]
//! - [`dash_compiler`]: register allocation, emission and the importers
//!
//! # Example
//!
//! ```
//! use dash::{AstBuilder, BinaryOp, Bump, TypeKind, VmContext};
//!
//! let arena = Bump::new();
//! let ast = AstBuilder::new(&arena);
//! let module = ast.module(&[ast.proc_decl(
//!     "max",
//!     &[("a", TypeKind::Integer), ("b", TypeKind::Integer)],
//!     &[TypeKind::Integer],
//!     &[
//!         ast.if_stmt(
//!             ast.binary(ast.var("a"), BinaryOp::Greater, ast.var("b")),
//!             ast.ret(&[ast.var("a")]),
//!             None,
//!         ),
//!         ast.ret(&[ast.var("b")]),
//!     ],
//! )]);
//!
//! let mut vm = VmContext::new();
//! let procedures = dash::import_module(&mut vm, &module).unwrap();
//! assert_eq!(procedures, 0..1);
//! assert!(vm.procedures().lookup("max").unwrap().1.is_compiled());
//! ```

use std::ops::Range;

pub use bumpalo::Bump;

pub use dash_core::{ArityProblem, CompilationError, Span, TypeKind, TypeList};

pub use dash_ast::{AstBuilder, BinaryOp, Expr, Module, ProcDecl, Stmt};

pub use dash_compiler::bytecode::{BytecodeChunk, Decoded, Instruction, OpCode, Register, Word};
pub use dash_compiler::{
    CodeSpan, CodegenOptions, CompiledProcedure, ExprCompiler, ExprValue, ModuleImporter,
    ProcedureCompiler, ProcedureEntry, ProcedureTable, RegisterAllocator, StmtCompiler, VmContext,
};

pub use dash_ast as ast;
pub use dash_compiler as compiler;

/// Import `module` into `vm` with default options.
///
/// Returns the procedure table indices the module now occupies. On error
/// `vm` is left exactly as it was.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn import_module(
    vm: &mut VmContext,
    module: &Module<'_>,
) -> Result<Range<usize>, CompilationError> {
    import_module_with(vm, module, CodegenOptions::default())
}

/// Import `module` into `vm` with explicit options.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn import_module_with(
    vm: &mut VmContext,
    module: &Module<'_>,
    options: CodegenOptions,
) -> Result<Range<usize>, CompilationError> {
    ModuleImporter::with_options(vm, options).import(module)
}
