//! Reference resolution: explicit library paths plus the libraries that
//! define a fixed set of anchor types.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, codes};

/// A well-known type and the library that defines it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AnchorType {
    pub type_name: String,
    pub library: String,
}

impl AnchorType {
    pub fn new(type_name: impl Into<String>, library: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            library: library.into(),
        }
    }

    /// Anchors for the base object type, file I/O, networking endpoints,
    /// query operators, text encoding, regular expressions and generic
    /// collections.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("System.Object", "System.Private.CoreLib"),
            Self::new("System.IO.File", "System.Private.CoreLib"),
            Self::new("System.Net.EndPoint", "System.Net.Primitives"),
            Self::new("System.Linq.Enumerable", "System.Linq"),
            Self::new("System.Text.Encoding", "System.Private.CoreLib"),
            Self::new(
                "System.Text.RegularExpressions.Regex",
                "System.Text.RegularExpressions",
            ),
            Self::new("System.Collections.Generic.List`1", "System.Private.CoreLib"),
        ]
    }
}

/// Finds the library file that defines an anchor type.
pub trait TypeLocator: fmt::Debug + Send + Sync {
    fn locate(&self, anchor: &AnchorType) -> Option<PathBuf>;

    /// Whether an explicitly referenced library is available.
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Resolves anchors to logical library names without touching the
/// filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicalLocator;

impl TypeLocator for LogicalLocator {
    fn locate(&self, anchor: &AnchorType) -> Option<PathBuf> {
        Some(PathBuf::from(format!("{}.dll", anchor.library)))
    }
}

/// Resolves anchors to `<library>.dll` files under a directory.
#[derive(Debug, Clone)]
pub struct DirectoryLocator {
    root: PathBuf,
}

impl DirectoryLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TypeLocator for DirectoryLocator {
    fn locate(&self, anchor: &AnchorType) -> Option<PathBuf> {
        let path = self.root.join(format!("{}.dll", anchor.library));
        path.is_file().then_some(path)
    }
}

/// The de-duplicated reference set of a compilation.
#[derive(Debug, Clone, Default)]
pub struct ResolvedReferences {
    pub paths: IndexSet<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Explicit references come first, in order, followed by anchor libraries.
/// Missing explicit references are reported; anchors the locator cannot
/// find are skipped.
pub fn resolve_references(
    explicit: &[PathBuf],
    anchors: &[AnchorType],
    locator: &dyn TypeLocator,
) -> ResolvedReferences {
    let mut resolved = ResolvedReferences::default();

    for path in explicit {
        if !locator.exists(path) {
            resolved.diagnostics.push(Diagnostic::error(
                codes::METADATA_FILE_NOT_FOUND,
                format!("Metadata file '{}' could not be found", path.display()),
            ));
            continue;
        }
        resolved.paths.insert(path.clone());
    }

    for anchor in anchors {
        match locator.locate(anchor) {
            Some(path) => {
                resolved.paths.insert(path);
            }
            None => tracing::debug!(anchor = %anchor.type_name, "anchor library not found"),
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_anchor_libraries_deduplicated() {
        let resolved = resolve_references(&[], &AnchorType::defaults(), &LogicalLocator);
        let names: Vec<_> = resolved.paths.iter().map(|p| p.display().to_string()).collect();
        assert_eq!(
            names,
            vec![
                "System.Private.CoreLib.dll",
                "System.Net.Primitives.dll",
                "System.Linq.dll",
                "System.Text.RegularExpressions.dll",
            ]
        );
        assert!(resolved.diagnostics.is_empty());
    }

    #[test]
    fn test_explicit_references_first() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("System.Linq.dll");
        fs::write(&lib, b"").unwrap();

        let locator = DirectoryLocator::new(temp.path());
        let resolved = resolve_references(
            std::slice::from_ref(&lib),
            &AnchorType::defaults(),
            &locator,
        );

        assert_eq!(resolved.paths.len(), 1);
        assert_eq!(resolved.paths.get_index(0), Some(&lib));
    }

    #[test]
    fn test_missing_explicit_reference() {
        let resolved = resolve_references(
            &[PathBuf::from("/nonexistent/Missing.dll")],
            &[],
            &LogicalLocator,
        );
        assert!(resolved.paths.is_empty());
        assert_eq!(resolved.diagnostics.len(), 1);
        assert_eq!(resolved.diagnostics[0].id, codes::METADATA_FILE_NOT_FOUND);
    }
}
