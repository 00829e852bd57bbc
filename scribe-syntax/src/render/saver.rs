use std::path::{Path, PathBuf};

use cscribe_core::{File, FileRules, GeneratedFile, WriteResult};

use super::{FormatOption, FormatOptions, render};
use crate::tree::CompilationUnit;

/// Renders compilation units to strings or files with fixed format options.
#[derive(Debug, Clone, Default)]
pub struct CodeSaver {
    options: FormatOptions,
}

impl CodeSaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A saver using the default options with `overrides` applied.
    pub fn with_options(overrides: impl IntoIterator<Item = FormatOption>) -> Self {
        Self {
            options: FormatOptions::with_overrides(overrides),
        }
    }

    pub fn from_format_options(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn save_code_as_string(&self, unit: &CompilationUnit) -> String {
        render(unit, &self.options)
    }

    /// Render `unit` and write it to `path`, creating parent directories.
    pub fn save_code_to_file(
        &self,
        unit: &CompilationUnit,
        path: impl AsRef<Path>,
    ) -> cscribe_core::Result<()> {
        let path = path.as_ref();
        File::new(path, self.save_code_as_string(unit)).write()?;
        tracing::info!(path = %path.display(), "saved generated source");
        Ok(())
    }
}

/// A generated source file placed relative to an output directory.
///
/// Written with an `// <auto-generated />` header and always overwritten.
#[derive(Debug, Clone)]
pub struct SourceFile {
    relative_path: PathBuf,
    unit: CompilationUnit,
    saver: CodeSaver,
}

impl SourceFile {
    pub fn new(relative_path: impl Into<PathBuf>, unit: CompilationUnit, saver: CodeSaver) -> Self {
        Self {
            relative_path: relative_path.into(),
            unit,
            saver,
        }
    }

    /// Write into `base`, returning the full path.
    pub fn write_into(&self, base: &Path) -> cscribe_core::Result<(PathBuf, WriteResult)> {
        let result = self.write(base)?;
        Ok((self.path(base), result))
    }
}

impl GeneratedFile for SourceFile {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.relative_path)
    }

    fn rules(&self) -> FileRules {
        FileRules::generated()
    }

    fn render(&self) -> String {
        self.saver.save_code_as_string(&self.unit)
    }
}
