use std::fmt;

use serde::Serialize;

use crate::diagnostic::{Diagnostic, Location};

/// One reported problem, in the shape presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub description: String,
    /// Severity name, e.g. `Error`.
    pub severity: String,
    /// Diagnostic identifier, e.g. `CS1002`.
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl From<&Diagnostic> for OutputRow {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            description: diagnostic.message.clone(),
            severity: diagnostic.severity.to_string(),
            code: diagnostic.id.to_string(),
            location: diagnostic.location,
        }
    }
}

impl fmt::Display for OutputRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "({},{}): ", loc.line, loc.column)?;
        }
        write!(f, "{} {}: {}", self.severity, self.code, self.description)
    }
}

/// Outcome of a compile request. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResult {
    output_path: String,
    success: bool,
    diagnostics: Vec<OutputRow>,
}

impl CompileResult {
    pub fn new(output_path: impl Into<String>, success: bool, diagnostics: Vec<OutputRow>) -> Self {
        Self {
            output_path: output_path.into(),
            success,
            diagnostics,
        }
    }

    /// Empty for in-memory compilation.
    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn diagnostics(&self) -> &[OutputRow] {
        &self.diagnostics
    }
}
