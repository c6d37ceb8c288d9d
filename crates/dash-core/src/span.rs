//! Source locations attached to AST nodes and diagnostics.

use std::fmt;

/// Position of a construct in the source, as line:column plus length.
///
/// The front end fills these in; the code generator only carries them into
/// [`CompilationError`](crate::CompilationError) so a diagnostic can point
/// back at the offending construct.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    #[inline]
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// A zero-length span at a position.
    #[inline]
    pub fn point(line: u32, col: u32) -> Self {
        Self { line, col, len: 0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Span starting at the earlier of the two positions and covering both.
    ///
    /// Spans on different lines keep the first position and sum the lengths.
    pub fn to(self, other: Span) -> Span {
        if self.line != other.line {
            return Span {
                line: self.line.min(other.line),
                col: if self.line < other.line { self.col } else { other.col },
                len: self.len + other.len,
            };
        }

        let start = self.col.min(other.col);
        let end = (self.col + self.len).max(other.col + other.len);
        Span {
            line: self.line,
            col: start,
            len: end - start,
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
