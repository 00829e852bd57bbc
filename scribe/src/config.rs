//! `cscribe.toml`: compiler profile and formatting defaults for the CLI.
//!
//! ```toml
//! [compiler]
//! language-version = "12"
//! output-kind = "library"
//! references = ["lib/Vendor.Models.dll"]
//!
//! [format]
//! new-lines-for-braces-in-types = true
//! indentation = { spaces = 4 }
//! ```

use std::path::{Path, PathBuf};

use cscribe_compiler::CompilerOptions;
use cscribe_syntax::render::FormatOptions;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "cscribe.toml";

/// Result type for config loading (boxed to keep it small on the stack)
pub type Result<T> = std::result::Result<T, Box<ConfigError>>;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass --config with the path to an existing cscribe.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(cscribe::config))]
    Parse {
        filename: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub compiler: CompilerOptions,
    pub format: FormatOptions,
}

impl Config {
    /// `explicit` if given, else `./cscribe.toml` if it exists, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::open(path);
        }
        let path = Path::new(CONFIG_FILE);
        if path.is_file() {
            Self::open(path)
        } else {
            tracing::debug!("no {CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|source| {
            Box::new(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        let config = Self::parse(&src, &path.display().to_string())?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(src: &str, filename: &str) -> Result<Self> {
        toml::from_str(src).map_err(|source| {
            Box::new(ConfigError::Parse {
                filename: filename.to_string(),
                src: NamedSource::new(filename, src.to_string()),
                span: source.span().map(SourceSpan::from),
                source,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use cscribe_compiler::{LanguageVersion, OutputKind};
    use cscribe_syntax::builder::Indent;

    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("", CONFIG_FILE).unwrap();
        assert_eq!(config.compiler.language_version, LanguageVersion::CSharp12);
        assert_eq!(config.format, FormatOptions::default());
    }

    #[test]
    fn test_parse_sections() {
        let src = r#"
[compiler]
language-version = "10"
output-kind = "console"
references = ["lib/Vendor.dll"]
usings = ["System"]

[format]
new-lines-for-braces-in-types = false
indentation = "tab"
"#;
        let config = Config::parse(src, CONFIG_FILE).unwrap();
        assert_eq!(config.compiler.language_version, LanguageVersion::CSharp10);
        assert_eq!(config.compiler.output_kind, OutputKind::Console);
        assert_eq!(
            config.compiler.references,
            vec![PathBuf::from("lib/Vendor.dll")]
        );
        assert_eq!(config.compiler.usings, vec!["System".to_string()]);
        assert!(!config.format.new_lines_for_braces_in_types);
        assert!(config.format.new_lines_for_braces_in_methods);
        assert_eq!(config.format.indentation, Indent::Tab);
    }

    #[test]
    fn test_custom_anchors() {
        let src = r#"
[[compiler.anchors]]
type-name = "Vendor.Widget"
library = "Vendor"
"#;
        let config = Config::parse(src, CONFIG_FILE).unwrap();
        assert_eq!(config.compiler.anchors.len(), 1);
        assert_eq!(config.compiler.anchors[0].library, "Vendor");
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = Config::parse("[compiler\n", CONFIG_FILE).unwrap_err();
        match *err {
            ConfigError::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(Config::parse("[output]\npath = \"x\"\n", CONFIG_FILE).is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::open(&dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(*err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_open_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[compiler]\nlanguage-version = \"9\"\n").unwrap();
        let config = Config::discover(Some(&path)).unwrap();
        assert_eq!(config.compiler.language_version, LanguageVersion::CSharp9);
    }
}
