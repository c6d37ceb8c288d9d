//! Bytecode emitter for the dash code generator.
//!
//! The [`BytecodeEmitter`] owns the chunk of the procedure being compiled.
//! Everything goes through [`BytecodeEmitter::reserve`], which appends
//! zeroed words for the caller to fill; the typed helpers below encode the
//! individual instructions on top of it.
//!
//! # Example
//!
//! ```
//! use dash_compiler::bytecode::OpCode;
//! use dash_compiler::emit::BytecodeEmitter;
//!
//! let mut emitter = BytecodeEmitter::new();
//! emitter.emit_store_int(0, 2).unwrap();
//! emitter.emit_store_int(1, 3).unwrap();
//! emitter.emit_binary(OpCode::AddI, 0, 1, 0).unwrap();
//!
//! let chunk = emitter.finish();
//! chunk.assert_opcodes(&[OpCode::Stor, OpCode::Stor, OpCode::AddI]);
//! ```

mod jumps;

use dash_core::{CompilationError, Span};

use crate::bytecode::{BytecodeChunk, Instruction, OpCode, Register, Word};
use jumps::JumpManager;

/// Default starting capacity of a procedure's chunk, in words.
pub const DEFAULT_CODE_CAPACITY: usize = 64;

/// Emits bytecode for a single procedure.
pub struct BytecodeEmitter {
    chunk: BytecodeChunk,
    jumps: JumpManager,
    current_line: u32,
}

impl Default for BytecodeEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl BytecodeEmitter {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CODE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chunk: BytecodeChunk::with_capacity(capacity),
            jumps: JumpManager::new(),
            current_line: 1,
        }
    }

    /// Set the source line attached to subsequent words.
    pub fn set_line(&mut self, line: u32) {
        self.current_line = line;
    }

    pub fn current_line(&self) -> u32 {
        self.current_line
    }

    // ==========================================================================
    // Basic Emission
    // ==========================================================================

    /// Append `n` zeroed words and return them for the caller to fill.
    ///
    /// Capacity at least doubles whenever the buffer is full.
    pub fn reserve(&mut self, n: usize) -> Result<&mut [Word], CompilationError> {
        self.chunk
            .grow(n, self.current_line)
            .map_err(|_| CompilationError::EmitterAllocationFailed { requested: n })
    }

    /// Emit a one-word instruction.
    pub fn emit(&mut self, instr: Instruction) -> Result<(), CompilationError> {
        self.reserve(1)?[0] = instr.encode();
        Ok(())
    }

    /// Emit an instruction followed by its immediate word.
    pub fn emit_with_immediate(
        &mut self,
        instr: Instruction,
        imm: Word,
    ) -> Result<(), CompilationError> {
        let slots = self.reserve(2)?;
        slots[0] = instr.encode();
        slots[1] = imm;
        Ok(())
    }

    // ==========================================================================
    // Data Movement
    // ==========================================================================

    /// `stor` of an integer literal into `dest`.
    pub fn emit_store_int(&mut self, dest: Register, value: i32) -> Result<(), CompilationError> {
        self.emit_with_immediate(Instruction::new(OpCode::Stor, 0, 0, dest), Word::int(value))
    }

    /// `stor` of a real literal into `dest`.
    pub fn emit_store_real(&mut self, dest: Register, value: f32) -> Result<(), CompilationError> {
        self.emit_with_immediate(Instruction::new(OpCode::Stor, 0, 0, dest), Word::real(value))
    }

    /// `mov` from `src` to `dest`.
    pub fn emit_move(&mut self, src: Register, dest: Register) -> Result<(), CompilationError> {
        self.emit(Instruction::new(OpCode::Mov, src, 0, dest))
    }

    // ==========================================================================
    // Arithmetic and Conversion
    // ==========================================================================

    /// Three-register instruction `r[c] = r[a] op r[b]`.
    pub fn emit_binary(
        &mut self,
        op: OpCode,
        a: Register,
        b: Register,
        c: Register,
    ) -> Result<(), CompilationError> {
        self.emit(Instruction::new(op, a, b, c))
    }

    /// `casti`/`castf` from `src` into `dest`.
    pub fn emit_cast(
        &mut self,
        op: OpCode,
        src: Register,
        dest: Register,
    ) -> Result<(), CompilationError> {
        self.emit(Instruction::new(op, src, 0, dest))
    }

    // ==========================================================================
    // Procedures
    // ==========================================================================

    /// Call procedure `index` on the window at `base`; outputs land at `base`.
    pub fn emit_call(&mut self, index: u16, base: Register) -> Result<(), CompilationError> {
        self.emit(Instruction::new(OpCode::Call, index, base, base))
    }

    /// Return `count` values starting at `base`.
    pub fn emit_return(&mut self, base: Register, count: u16) -> Result<(), CompilationError> {
        self.emit(Instruction::new(OpCode::Ret, base, count, 0))
    }

    // ==========================================================================
    // Jumps
    // ==========================================================================

    /// Emit a forward `jmp` with a placeholder offset.
    pub fn emit_jump(&mut self) -> Result<JumpLabel, CompilationError> {
        self.emit_with_immediate(Instruction::new(OpCode::Jmp, 0, 0, 0), Word::ZERO)?;
        Ok(JumpLabel(self.chunk.len() - 1))
    }

    /// Emit a forward `jz` on `cond` with a placeholder offset.
    pub fn emit_jump_if_zero(&mut self, cond: Register) -> Result<JumpLabel, CompilationError> {
        self.emit_with_immediate(Instruction::new(OpCode::Jz, cond, 0, 0), Word::ZERO)?;
        Ok(JumpLabel(self.chunk.len() - 1))
    }

    /// Point a forward jump at the current offset.
    pub fn patch_jump(&mut self, label: JumpLabel) -> Result<(), CompilationError> {
        let rel = self.relative_offset(label.0 + 1, self.current_offset())?;
        if let Some(slot) = self.chunk.words_mut().get_mut(label.0) {
            *slot = Word::int(rel);
        }
        Ok(())
    }

    /// Emit a backward `jmp` to `target`.
    pub fn emit_loop(&mut self, target: usize) -> Result<(), CompilationError> {
        let rel = self.relative_offset(self.current_offset() + 2, target)?;
        self.emit_with_immediate(Instruction::new(OpCode::Jmp, 0, 0, 0), Word::int(rel))
    }

    /// Current bytecode offset.
    ///
    /// Used to mark loop heads before the condition is emitted.
    pub fn current_offset(&self) -> usize {
        self.chunk.len()
    }

    fn relative_offset(&self, from: usize, to: usize) -> Result<i32, CompilationError> {
        let rel = to as i64 - from as i64;
        i32::try_from(rel).map_err(|_| CompilationError::MalformedAst {
            message: format!("jump distance {rel} does not fit an immediate"),
            span: Span::point(self.current_line, 1),
        })
    }

    // ==========================================================================
    // Loop Control (Break/Continue)
    // ==========================================================================

    /// Enter a loop whose head is at `continue_target`.
    pub fn enter_loop(&mut self, continue_target: usize) {
        self.jumps.enter_loop(continue_target);
    }

    /// Leave the innermost loop, patching its breaks to the current offset.
    ///
    /// Call this after the backward jump.
    pub fn exit_loop(&mut self) -> Result<(), CompilationError> {
        for label in self.jumps.exit_loop() {
            self.patch_jump(label)?;
        }
        Ok(())
    }

    /// Emit a `break`; outside a loop this is a malformed tree.
    pub fn emit_break(&mut self, span: Span) -> Result<(), CompilationError> {
        if !self.jumps.in_loop() {
            return Err(CompilationError::MalformedAst {
                message: "break statement not inside a loop".into(),
                span,
            });
        }
        let label = self.emit_jump()?;
        self.jumps.add_break(label);
        Ok(())
    }

    /// Emit a `continue`; outside a loop this is a malformed tree.
    pub fn emit_continue(&mut self, span: Span) -> Result<(), CompilationError> {
        let target = self
            .jumps
            .continue_target()
            .ok_or_else(|| CompilationError::MalformedAst {
                message: "continue statement not inside a loop".into(),
                span,
            })?;
        self.emit_loop(target)
    }

    pub fn in_loop(&self) -> bool {
        self.jumps.in_loop()
    }

    pub fn loop_depth(&self) -> usize {
        self.jumps.loop_depth()
    }

    // ==========================================================================
    // Finalization
    // ==========================================================================

    pub fn finish(self) -> BytecodeChunk {
        self.chunk
    }

    /// Read-only view of what has been emitted so far.
    pub fn chunk(&self) -> &BytecodeChunk {
        &self.chunk
    }

    pub fn code_size(&self) -> usize {
        self.chunk.len()
    }
}

/// Offset of a jump's immediate word, waiting to be patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpLabel(pub(crate) usize);

impl JumpLabel {
    pub fn offset(&self) -> usize {
        self.0
    }
}
