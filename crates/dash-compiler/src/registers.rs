//! Register allocation for one procedure frame.
//!
//! The frame is split at a moving boundary:
//!
//! ```text
//!  0            boundary           top              limit
//!  ├── named ───┼─── temporaries ───┼──── free ──────┤
//! ```
//!
//! Named registers hold parameters and locals and stay put until their
//! scope ends. Temporaries form a LIFO stack directly above the boundary;
//! expression code pushes them and the statement compiler clears them at
//! the end of every statement. Nothing outside `[0, top)` is live, and no
//! two live values share an index.

use dash_core::{CompilationError, Span, TypeKind};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::bytecode::Register;
use crate::options::DEFAULT_REGISTER_LIMIT;

// ============================================================================
// Types
// ============================================================================

/// A named register.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub register: Register,
    pub ty: TypeKind,
    /// Scope depth the name was declared at.
    pub depth: u32,
    /// Where the name was declared.
    pub span: Span,
}

/// Every register of the frame is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("register limit of {limit} reached")]
pub struct RegisterExhausted {
    pub limit: u16,
}

impl RegisterExhausted {
    /// Attach the location that asked for the register.
    pub fn at(self, span: Span) -> CompilationError {
        CompilationError::RegisterExhausted {
            limit: self.limit,
            span,
        }
    }
}

// ============================================================================
// RegisterAllocator
// ============================================================================

#[derive(Debug)]
pub struct RegisterAllocator {
    /// Size of the register file.
    limit: u16,
    /// First register above the named region.
    boundary: u16,
    /// Number of live temporaries above the boundary.
    temps: u16,
    /// Most registers live at once.
    high_water: u16,

    /// Visible bindings by name.
    variables: FxHashMap<String, Binding>,
    /// Bindings hidden by a declaration at a deeper scope, with that depth.
    shadowed: Vec<(u32, Binding)>,
    /// Boundary on entry to each open scope.
    scopes: Vec<u16>,
}

impl Default for RegisterAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTER_LIMIT)
    }
}

impl RegisterAllocator {
    pub fn new(limit: u16) -> Self {
        Self {
            limit,
            boundary: 0,
            temps: 0,
            high_water: 0,
            variables: FxHashMap::default(),
            shadowed: Vec::new(),
            scopes: Vec::new(),
        }
    }

    fn top(&self) -> u16 {
        self.boundary + self.temps
    }

    fn note_live(&mut self) {
        self.high_water = self.high_water.max(self.top());
    }

    // ==========================================================================
    // Temporaries
    // ==========================================================================

    /// Allocate the next register above everything live.
    pub fn push_temp(&mut self) -> Result<Register, RegisterExhausted> {
        let next = self.top();
        if next >= self.limit {
            return Err(RegisterExhausted { limit: self.limit });
        }
        self.temps += 1;
        self.note_live();
        Ok(next)
    }

    /// Make the temporary `r` the top of the stack, keeping its value.
    ///
    /// Everything above `r` is released. Does nothing if `r` is not a
    /// live temporary.
    pub fn pop_temp_to(&mut self, r: Register) {
        if self.is_temp(r) {
            self.temps = r - self.boundary + 1;
        }
    }

    /// Release every temporary strictly above `r`.
    ///
    /// `r` may be named or already free; only indices greater than `r`
    /// are affected.
    pub fn pop_temp_past(&mut self, r: Register) {
        let keep = u32::from(r) + 1;
        if keep < u32::from(self.top()) {
            self.temps = (keep as u16).saturating_sub(self.boundary);
        }
    }

    /// Release `r` and every temporary above it.
    pub fn release_from(&mut self, r: Register) {
        if r < self.top() {
            self.temps = r.saturating_sub(self.boundary);
        }
    }

    /// Statement boundary: no temporary outlives it.
    pub fn clear_temps(&mut self) {
        self.temps = 0;
    }

    pub fn is_named(&self, r: Register) -> bool {
        r < self.boundary
    }

    pub fn is_temp(&self, r: Register) -> bool {
        r >= self.boundary && r < self.top()
    }

    /// The register the next [`push_temp`](Self::push_temp) would return.
    pub fn next_free_index(&self) -> Register {
        self.top()
    }

    pub fn temp_count(&self) -> u16 {
        self.temps
    }

    pub fn boundary(&self) -> Register {
        self.boundary
    }

    // ==========================================================================
    // Named registers
    // ==========================================================================

    /// Innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.variables.get(name)
    }

    /// Bind `name` to a fresh register at the boundary.
    ///
    /// The temporary stack must be empty.
    pub fn declare(
        &mut self,
        name: &str,
        ty: TypeKind,
        span: Span,
    ) -> Result<Register, CompilationError> {
        if self.temps != 0 {
            return Err(CompilationError::MalformedAst {
                message: format!("'{name}' declared while temporaries are live"),
                span,
            });
        }
        if self.boundary >= self.limit {
            return Err(RegisterExhausted { limit: self.limit }.at(span));
        }
        self.bind(name, ty, span)
    }

    /// Turn the lowest temporaries into named bindings, in order.
    ///
    /// This is how a declaration keeps the value window its initialisers
    /// were evaluated into.
    pub fn promote_temps<'n>(
        &mut self,
        vars: impl IntoIterator<Item = (&'n str, TypeKind, Span)>,
    ) -> Result<(), CompilationError> {
        for (name, ty, span) in vars {
            if self.temps == 0 {
                return Err(CompilationError::MalformedAst {
                    message: format!("no value left to bind '{name}' to"),
                    span,
                });
            }
            self.temps -= 1;
            self.bind(name, ty, span)?;
        }
        Ok(())
    }

    fn bind(&mut self, name: &str, ty: TypeKind, span: Span) -> Result<Register, CompilationError> {
        let depth = self.depth();
        if let Some(existing) = self.variables.get(name) {
            if existing.depth == depth {
                return Err(CompilationError::VariableRedeclaration {
                    name: name.to_string(),
                    span,
                });
            }
            self.shadowed.push((depth, existing.clone()));
        }

        let register = self.boundary;
        self.boundary += 1;
        self.note_live();
        self.variables.insert(
            name.to_string(),
            Binding {
                name: name.to_string(),
                register,
                ty,
                depth,
                span,
            },
        );
        Ok(register)
    }

    // ==========================================================================
    // Scopes
    // ==========================================================================

    pub fn enter_scope(&mut self) {
        self.scopes.push(self.boundary);
    }

    /// Drop the innermost scope's bindings and give back their registers.
    pub fn exit_scope(&mut self) {
        let depth = self.depth();
        let Some(boundary) = self.scopes.pop() else {
            return;
        };

        self.variables.retain(|_, binding| binding.depth < depth);
        while let Some((shadowing_depth, _)) = self.shadowed.last() {
            if *shadowing_depth != depth {
                break;
            }
            if let Some((_, binding)) = self.shadowed.pop() {
                self.variables.insert(binding.name.clone(), binding);
            }
        }

        self.boundary = boundary;
        self.temps = 0;
    }

    /// Current scope depth (0 = procedure scope).
    pub fn depth(&self) -> u32 {
        self.scopes.len() as u32
    }

    /// Registers the frame needs: the most that were ever live at once.
    pub fn register_count(&self) -> u16 {
        self.high_water
    }

    pub fn limit(&self) -> u16 {
        self.limit
    }
}
