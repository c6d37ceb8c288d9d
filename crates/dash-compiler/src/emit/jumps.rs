//! Loop bookkeeping for `break` and `continue`.
//!
//! Each enclosing loop remembers where `continue` lands and which forward
//! `jmp`s were emitted by `break` so they can be patched once the loop's
//! exit is known.

use super::JumpLabel;

/// Stack of enclosing loops, innermost last.
#[derive(Debug, Default)]
pub struct JumpManager {
    loops: Vec<LoopContext>,
}

#[derive(Debug)]
struct LoopContext {
    /// Word offset of the loop head, where the condition is evaluated.
    continue_target: usize,
    /// `break` jumps waiting for the loop exit.
    break_labels: Vec<JumpLabel>,
}

impl JumpManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_loop(&mut self, continue_target: usize) {
        self.loops.push(LoopContext {
            continue_target,
            break_labels: Vec::new(),
        });
    }

    /// Leave the innermost loop, handing back its pending breaks.
    pub fn exit_loop(&mut self) -> Vec<JumpLabel> {
        self.loops
            .pop()
            .map(|ctx| ctx.break_labels)
            .unwrap_or_default()
    }

    pub fn in_loop(&self) -> bool {
        !self.loops.is_empty()
    }

    /// Record a `break` jump; ignored outside a loop.
    pub fn add_break(&mut self, label: JumpLabel) {
        if let Some(ctx) = self.loops.last_mut() {
            ctx.break_labels.push(label);
        }
    }

    pub fn continue_target(&self) -> Option<usize> {
        self.loops.last().map(|ctx| ctx.continue_target)
    }

    pub fn loop_depth(&self) -> usize {
        self.loops.len()
    }
}
