//! Code generator configuration.

use crate::emit::DEFAULT_CODE_CAPACITY;

/// Default size of a frame's register file.
pub const DEFAULT_REGISTER_LIMIT: u16 = 256;

/// Knobs for procedure and module import.
///
/// ```
/// use dash_compiler::CodegenOptions;
///
/// let options = CodegenOptions::default().with_register_limit(16);
/// assert_eq!(options.register_limit, 16);
/// assert_eq!(options.initial_code_capacity, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Registers available to one frame; a procedure needing more fails
    /// with `RegisterExhausted`.
    pub register_limit: u16,
    /// Words reserved up front for each procedure's chunk.
    pub initial_code_capacity: usize,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            register_limit: DEFAULT_REGISTER_LIMIT,
            initial_code_capacity: DEFAULT_CODE_CAPACITY,
        }
    }
}

impl CodegenOptions {
    pub fn with_register_limit(mut self, limit: u16) -> Self {
        self.register_limit = limit;
        self
    }

    pub fn with_initial_code_capacity(mut self, capacity: usize) -> Self {
        self.initial_code_capacity = capacity;
        self
    }
}
