use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Trait for types that represent a generated source file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        let rules = self.rules();
        let content = rules.apply_header(self.render());
        write_with_rules(&path, &content, rules.overwrite)
    }
}

fn write_with_rules(path: &Path, content: &str, overwrite: Overwrite) -> Result<WriteResult> {
    if overwrite == Overwrite::IfMissing && path.exists() {
        tracing::debug!(path = %path.display(), "file exists, skipping");
        return Ok(WriteResult::Skipped);
    }
    write_file(path, content)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(WriteResult::Written)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| Error::io(path, e))
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// A source file to be written
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a new file with the given path and content (default rules: always overwrite)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Replace the write rules.
    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file according to its rules
    pub fn write(&self) -> Result<WriteResult> {
        let content = self.rules.apply_header(self.content.clone());
        write_with_rules(&self.path, &content, self.rules.overwrite)
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone)]
pub struct FileRules {
    pub overwrite: Overwrite,
    /// Comment line placed before the content, e.g. `// <auto-generated />`.
    pub header: Option<&'static str>,
}

impl FileRules {
    /// Rules for fully generated sources: always overwrite, marked as generated.
    pub fn generated() -> Self {
        Self {
            overwrite: Overwrite::Always,
            header: Some("// <auto-generated />"),
        }
    }

    fn apply_header(&self, content: String) -> String {
        match self.header {
            Some(header) => format!("{header}\n{content}"),
            None => content,
        }
    }
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (generated code)
    Always,
    /// Only create if file doesn't exist (stubs)
    IfMissing,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            overwrite: Overwrite::Always,
            header: None,
        }
    }
}
