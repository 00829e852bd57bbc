use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::references::AnchorType;

/// C# language version that parsing is pinned to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum LanguageVersion {
    CSharp6,
    CSharp7,
    CSharp7_3,
    CSharp8,
    CSharp9,
    CSharp10,
    CSharp11,
    #[default]
    CSharp12,
}

impl LanguageVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageVersion::CSharp6 => "6",
            LanguageVersion::CSharp7 => "7",
            LanguageVersion::CSharp7_3 => "7.3",
            LanguageVersion::CSharp8 => "8",
            LanguageVersion::CSharp9 => "9",
            LanguageVersion::CSharp10 => "10",
            LanguageVersion::CSharp11 => "11",
            LanguageVersion::CSharp12 => "12",
        }
    }
}

impl TryFrom<String> for LanguageVersion {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for LanguageVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C# {}", self.as_str())
    }
}

impl FromStr for LanguageVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix("csharp")
            .or_else(|| s.strip_prefix("CSharp"))
            .unwrap_or(s);
        let s = s.strip_suffix(".0").unwrap_or(s);
        match s {
            "6" => Ok(LanguageVersion::CSharp6),
            "7" => Ok(LanguageVersion::CSharp7),
            "7.3" | "7_3" => Ok(LanguageVersion::CSharp7_3),
            "8" => Ok(LanguageVersion::CSharp8),
            "9" => Ok(LanguageVersion::CSharp9),
            "10" => Ok(LanguageVersion::CSharp10),
            "11" => Ok(LanguageVersion::CSharp11),
            "12" | "latest" => Ok(LanguageVersion::CSharp12),
            other => Err(format!("unsupported language version '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationLevel {
    Debug,
    #[default]
    Release,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputKind {
    #[default]
    Library,
    Console,
}

/// Fixed compilation profile.
///
/// Every field has a default; a `[compiler]` table in `cscribe.toml`
/// overrides only the keys it names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CompilerOptions {
    pub language_version: LanguageVersion,
    pub overflow_checks: bool,
    pub optimization: OptimizationLevel,
    pub output_kind: OutputKind,
    /// Namespaces imported into every source.
    pub usings: Vec<String>,
    /// Explicit library paths, resolved before anchor libraries.
    pub references: Vec<PathBuf>,
    /// Well-known types whose defining libraries are always referenced.
    pub anchors: Vec<AnchorType>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            language_version: LanguageVersion::default(),
            overflow_checks: true,
            optimization: OptimizationLevel::default(),
            output_kind: OutputKind::default(),
            usings: DEFAULT_USINGS.iter().map(|u| u.to_string()).collect(),
            references: Vec::new(),
            anchors: AnchorType::defaults(),
        }
    }
}

impl CompilerOptions {
    pub fn with_references<P: Into<PathBuf>>(mut self, references: impl IntoIterator<Item = P>) -> Self {
        self.references = references.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_language_version(mut self, version: LanguageVersion) -> Self {
        self.language_version = version;
        self
    }

    pub fn with_output_kind(mut self, kind: OutputKind) -> Self {
        self.output_kind = kind;
        self
    }
}

pub const DEFAULT_USINGS: &[&str] = &[
    "System",
    "System.IO",
    "System.Net",
    "System.Linq",
    "System.Text",
    "System.Text.RegularExpressions",
    "System.Collections.Generic",
];
