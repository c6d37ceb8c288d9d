//! Procedure table shared by every module imported into a VM.
//!
//! Procedures are addressed by their index in the table; `call` carries that
//! index in operand `a`. The name index is only used while compiling.

use dash_core::{CompilationError, Span, TypeKind, TypeList};
use rustc_hash::FxHashMap;

/// Where a compiled procedure lives in the VM code buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSpan {
    /// Word offset of the first instruction.
    pub entry: usize,
    /// Length in words.
    pub len: usize,
}

/// One procedure signature and, once compiled, its code.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureEntry {
    pub name: String,
    pub params: TypeList,
    pub outputs: TypeList,
    /// Declaration site.
    pub span: Span,
    /// `None` until the body has been compiled.
    pub code: Option<CodeSpan>,
    /// Registers the frame needs.
    pub register_count: u16,
}

impl ProcedureEntry {
    pub fn new(name: impl Into<String>, params: TypeList, outputs: TypeList, span: Span) -> Self {
        Self {
            name: name.into(),
            params,
            outputs,
            span,
            code: None,
            register_count: 0,
        }
    }

    pub fn is_compiled(&self) -> bool {
        self.code.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProcedureTable {
    entries: Vec<ProcedureEntry>,
    by_name: FxHashMap<String, usize>,
}

impl ProcedureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a signature, returning its index.
    pub fn register(&mut self, entry: ProcedureEntry) -> Result<usize, CompilationError> {
        if self.by_name.contains_key(&entry.name) {
            return Err(CompilationError::DuplicateDefinition {
                name: entry.name,
                span: entry.span,
            });
        }
        let index = self.entries.len();
        self.by_name.insert(entry.name.clone(), index);
        self.entries.push(entry);
        Ok(index)
    }

    /// Index and entry of the procedure called `name`.
    pub fn lookup(&self, name: &str) -> Option<(usize, &ProcedureEntry)> {
        let index = *self.by_name.get(name)?;
        self.entries.get(index).map(|entry| (index, entry))
    }

    pub fn get(&self, index: usize) -> Option<&ProcedureEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ProcedureEntry> {
        self.entries.get_mut(index)
    }

    /// Signature shorthand used by tests and embedders.
    pub fn declare(
        &mut self,
        name: &str,
        params: &[TypeKind],
        outputs: &[TypeKind],
    ) -> Result<usize, CompilationError> {
        self.register(ProcedureEntry::new(
            name,
            params.to_vec(),
            outputs.to_vec(),
            Span::default(),
        ))
    }

    /// Forget every entry from `len` on.
    pub fn truncate(&mut self, len: usize) {
        for entry in self.entries.drain(len.min(self.entries.len())..) {
            self.by_name.remove(&entry.name);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcedureEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut table = ProcedureTable::new();
        assert_eq!(table.declare("f", &[TypeKind::Integer], &[]), Ok(0));
        assert_eq!(table.declare("g", &[], &[TypeKind::Real]), Ok(1));

        let (index, entry) = table.lookup("g").unwrap();
        assert_eq!(index, 1);
        assert_eq!(entry.outputs, vec![TypeKind::Real]);
        assert!(!entry.is_compiled());
        assert!(table.lookup("h").is_none());
    }

    #[test]
    fn duplicate_name() {
        let mut table = ProcedureTable::new();
        table.declare("f", &[], &[]).unwrap();
        let err = table.declare("f", &[TypeKind::Integer], &[]).unwrap_err();
        assert!(matches!(err, CompilationError::DuplicateDefinition { name, .. } if name == "f"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn truncate_forgets_names() {
        let mut table = ProcedureTable::new();
        table.declare("f", &[], &[]).unwrap();
        table.declare("g", &[], &[]).unwrap();
        table.truncate(1);

        assert_eq!(table.len(), 1);
        assert!(table.lookup("g").is_none());
        assert_eq!(table.declare("g", &[], &[]), Ok(1));
    }
}
