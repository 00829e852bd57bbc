//! Check and build report data structures.

use std::path::PathBuf;

use cscribe_compiler::{CompileResult, Module, OutputRow};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use super::output::{Output, Report};

/// A compiled source and the name it is reported under.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// One error row, attached to the source it points into.
#[derive(Debug, Error, Diagnostic)]
#[error("{code}: {message}")]
pub struct CompileDiagnostic {
    code: String,
    message: String,
    file: Option<String>,
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    span: Option<SourceSpan>,
}

impl CompileDiagnostic {
    /// Rows without a location, or pointing past `sources`, render without
    /// a snippet.
    pub fn from_row(row: &OutputRow, sources: &[SourceFile]) -> Self {
        let located = row
            .location
            .and_then(|loc| sources.get(loc.source).map(|file| (file, loc)));

        let (file, src, span) = match located {
            Some((file, loc)) => (
                Some(file.name.clone()),
                NamedSource::new(&file.name, file.text.clone()),
                Some(SourceSpan::from((loc.offset, loc.length))),
            ),
            None => (None, NamedSource::new("<none>", String::new()), None),
        };

        Self {
            code: row.code.clone(),
            message: row.description.clone(),
            file,
            src,
            span,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

/// Report data from compiling a set of sources.
#[derive(Debug)]
pub struct CheckReport {
    sources: Vec<SourceFile>,
    result: CompileResult,
}

impl CheckReport {
    pub fn new(sources: Vec<SourceFile>, result: CompileResult) -> Self {
        Self { sources, result }
    }

    /// Whether the sources compiled.
    pub fn is_valid(&self) -> bool {
        self.result.success()
    }

    pub fn result(&self) -> &CompileResult {
        &self.result
    }

    pub fn diagnostics(&self) -> Vec<CompileDiagnostic> {
        self.result
            .diagnostics()
            .iter()
            .map(|row| CompileDiagnostic::from_row(row, &self.sources))
            .collect()
    }

    fn subject(&self) -> String {
        match self.sources.as_slice() {
            [single] => single.name.clone(),
            sources => format!("{} files", sources.len()),
        }
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        let diagnostics = self.diagnostics();
        let count = diagnostics.len();
        for diagnostic in diagnostics {
            out.diagnostic(miette::Report::new(diagnostic));
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} compiled", self.subject()));
        } else {
            out.newline();
            out.warning(&format!(
                "{} failed with {} error{}",
                self.subject(),
                count,
                if count == 1 { "" } else { "s" }
            ));
        }
    }
}

/// Report data from compiling sources into a module on disk.
#[derive(Debug)]
pub struct BuildReport {
    pub output: PathBuf,
    pub check: CheckReport,
    /// The module as read back from `output`; `None` when nothing was written.
    pub module: Option<Module>,
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        self.check.render(out);

        let Some(module) = &self.module else {
            return;
        };

        out.added_item(&self.output.display().to_string());
        out.newline();
        out.section(&format!(
            "{} ({} type{})",
            module.name,
            module.types.len(),
            if module.types.len() == 1 { "" } else { "s" }
        ));
        for ty in &module.types {
            out.list_item(&format!("{} {}", ty.kind.keyword(), ty.full_name()));
        }
        if !module.references.is_empty() {
            out.newline();
            out.section("references");
            for reference in &module.references {
                out.list_item(reference);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cscribe_compiler::Location;

    use super::*;
    use crate::reports::output::RecordingOutput;

    fn row(location: Option<Location>) -> OutputRow {
        OutputRow {
            description: "; expected".to_string(),
            severity: "Error".to_string(),
            code: "CS1002".to_string(),
            location,
        }
    }

    fn location(source: usize) -> Location {
        Location {
            source,
            offset: 4,
            length: 0,
            line: 1,
            column: 5,
        }
    }

    #[test]
    fn test_diagnostic_attaches_to_source() {
        let sources = vec![SourceFile::new("A.cs", "int x"), SourceFile::new("B.cs", "int y")];
        let diagnostic = CompileDiagnostic::from_row(&row(Some(location(1))), &sources);
        assert_eq!(diagnostic.code(), "CS1002");
        assert_eq!(diagnostic.file(), Some("B.cs"));
        assert_eq!(diagnostic.to_string(), "CS1002: ; expected");
    }

    #[test]
    fn test_diagnostic_without_location() {
        let sources = vec![SourceFile::new("A.cs", "int x")];
        assert_eq!(CompileDiagnostic::from_row(&row(None), &sources).file(), None);
        assert_eq!(
            CompileDiagnostic::from_row(&row(Some(location(3))), &sources).file(),
            None
        );
    }

    #[test]
    fn test_render_success() {
        let report = CheckReport::new(
            vec![SourceFile::new("A.cs", "class A;")],
            CompileResult::new("", true, Vec::new()),
        );
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines, vec!["✓ A.cs compiled"]);
    }

    #[test]
    fn test_render_failure_counts_errors() {
        let report = CheckReport::new(
            vec![SourceFile::new("A.cs", "int x"), SourceFile::new("B.cs", "")],
            CompileResult::new("", false, vec![row(Some(location(0))), row(None)]),
        );
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines[0], "error: CS1002: ; expected");
        assert_eq!(out.lines.last().unwrap(), "warning: 2 files failed with 2 errors");
    }
}
