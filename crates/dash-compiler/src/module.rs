//! Module importer: compiles a whole module into a [`VmContext`].
//!
//! Every signature is registered before any body is compiled, so procedures
//! may call each other regardless of declaration order. An import is all or
//! nothing: on the first error the context is rolled back to where it was.

use std::ops::Range;

use dash_ast::{Module, ProcDecl};
use dash_core::CompilationError;

use crate::context::VmContext;
use crate::options::CodegenOptions;
use crate::procedure::ProcedureCompiler;
use crate::registry::{CodeSpan, ProcedureEntry};

type Result<T> = std::result::Result<T, CompilationError>;

pub struct ModuleImporter<'vm> {
    vm: &'vm mut VmContext,
    options: CodegenOptions,
}

impl<'vm> ModuleImporter<'vm> {
    pub fn new(vm: &'vm mut VmContext) -> Self {
        Self::with_options(vm, CodegenOptions::default())
    }

    pub fn with_options(vm: &'vm mut VmContext, options: CodegenOptions) -> Self {
        Self { vm, options }
    }

    /// Import every procedure of `module`.
    ///
    /// Returns the range of procedure table indices the module occupies.
    #[cfg_attr(feature = "profiling", profiling::function)]
    #[tracing::instrument(level = "debug", skip_all, fields(procedures = module.procs.len()))]
    pub fn import<'ast>(&mut self, module: &Module<'ast>) -> Result<Range<usize>> {
        self.transaction(module.procs)
    }

    /// Import a single procedure, as a module of one.
    #[cfg_attr(feature = "profiling", profiling::function)]
    #[tracing::instrument(level = "debug", skip_all, fields(procedure = decl.name.name))]
    pub fn import_procedure<'ast>(&mut self, decl: &ProcDecl<'ast>) -> Result<usize> {
        let range = self.transaction(std::slice::from_ref(decl))?;
        Ok(range.start)
    }

    fn transaction<'ast>(&mut self, procs: &[ProcDecl<'ast>]) -> Result<Range<usize>> {
        let checkpoint = self.vm.checkpoint();
        match self.import_all(procs) {
            Ok(range) => Ok(range),
            Err(err) => {
                tracing::debug!(code = err.code(), error = %err, "import failed, rolling back");
                self.vm.rollback(checkpoint);
                Err(err)
            }
        }
    }

    fn import_all<'ast>(&mut self, procs: &[ProcDecl<'ast>]) -> Result<Range<usize>> {
        let first = self.vm.procedures().len();
        for decl in procs {
            self.vm.procedures_mut().register(ProcedureEntry::new(
                decl.name.name,
                decl.param_types().collect(),
                decl.outputs.to_vec(),
                decl.span,
            ))?;
        }

        for (index, decl) in (first..).zip(procs) {
            let compiled =
                ProcedureCompiler::new(self.vm.procedures(), self.options).compile(decl)?;
            let entry = self.vm.append_code(&compiled.chunk)?;

            let slot = self
                .vm
                .procedures_mut()
                .get_mut(index)
                .ok_or_else(|| CompilationError::MalformedAst {
                    message: format!("procedure `{}` vanished from the table", decl.name.name),
                    span: decl.span,
                })?;
            slot.code = Some(CodeSpan {
                entry,
                len: compiled.chunk.len(),
            });
            slot.register_count = compiled.register_count;

            tracing::debug!(
                procedure = decl.name.name,
                index,
                entry,
                words = compiled.chunk.len(),
                registers = compiled.register_count,
                "procedure imported"
            );
        }

        Ok(first..first + procs.len())
    }
}
