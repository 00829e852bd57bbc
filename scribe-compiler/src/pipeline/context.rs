use std::{path::PathBuf, sync::Arc};

use indexmap::IndexSet;

use crate::{
    diagnostic::{Diagnostic, Severity},
    module::Module,
    options::CompilerOptions,
    syntax::SyntaxTree,
};

/// State carried through the pipeline phases.
#[derive(Debug)]
pub struct CompilationContext {
    pub options: Arc<CompilerOptions>,
    /// Module name, taken from the output file name.
    pub name: String,
    pub sources: Vec<String>,
    /// Where the module image is written; `None` compiles in memory.
    pub output: Option<PathBuf>,
    /// Populated by [`ParsePhase`](super::ParsePhase).
    pub trees: Vec<SyntaxTree>,
    /// Populated by [`ReferencePhase`](super::ReferencePhase).
    pub references: IndexSet<PathBuf>,
    /// Populated by [`EmitPhase`](super::EmitPhase) on success.
    pub module: Option<Module>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(options: Arc<CompilerOptions>, sources: Vec<String>, output: Option<PathBuf>) -> Self {
        let name = output
            .as_deref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "temporary".to_string());
        Self {
            options,
            name,
            sources,
            output,
            trees: Vec::new(),
            references: IndexSet::new(),
            module: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
