//! dash code generator
//!
//! Lowers the typed dash AST into register bytecode for the dash VM.
//!
//! ## Architecture
//!
//! - **Registration**: every procedure signature of a module goes into the
//!   VM's procedure table
//! - **Compilation**: each body is compiled with its own register allocator
//!   and emitter, then appended to the VM code buffer
//!
//! ## Modules
//!
//! - [`bytecode`]: Instruction words, opcodes and the bytecode chunk
//! - [`context`]: VM code buffer and procedure table
//! - [`emit`]: Bytecode emitter with jump patching and loop contexts
//! - [`expr`]: Expression compiler
//! - [`registers`]: Stack-discipline register allocator
//! - [`registry`]: Procedure table
//! - [`stmt`]: Statement compiler for control flow and declarations
//! - [`procedure`] / [`module`]: Importers driving the compilers

pub mod bytecode;
pub mod context;
pub mod emit;
pub mod expr;
mod expr_value;
pub mod module;
pub mod options;
pub mod procedure;
pub mod registers;
pub mod registry;
mod return_checker;
pub mod stmt;

#[cfg(test)]
mod testing;

pub use context::{Checkpoint, VmContext};
pub use emit::{BytecodeEmitter, JumpLabel};
pub use expr::{ExprCompiler, WindowKind};
pub use expr_value::ExprValue;
pub use module::ModuleImporter;
pub use options::{CodegenOptions, DEFAULT_REGISTER_LIMIT};
pub use procedure::{CompiledProcedure, ProcedureCompiler};
pub use registers::{Binding, RegisterAllocator, RegisterExhausted};
pub use registry::{CodeSpan, ProcedureEntry, ProcedureTable};
pub use return_checker::{always_returns, block_always_returns};
pub use stmt::StmtCompiler;

// Re-export CompilationError from core for convenience
pub use dash_core::CompilationError;
