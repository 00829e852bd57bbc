//! Diagnostics reported while parsing, binding references and emitting.

use std::fmt;

use serde::Serialize;

/// Severity of a diagnostic, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Hidden => write!(f, "Hidden"),
            Severity::Info => write!(f, "Info"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
        }
    }
}

/// Where a diagnostic points: a byte range in one of the compiled sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Index of the source fragment in the compile request.
    pub source: usize,
    pub offset: usize,
    pub length: usize,
    /// 1-based.
    pub line: usize,
    /// 1-based, in characters.
    pub column: usize,
}

/// A diagnostic message from one of the compilation stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub id: &'static str,
    pub severity: Severity,
    pub message: String,
    pub location: Option<Location>,
}

impl Diagnostic {
    pub fn error(id: &'static str, message: impl Into<String>) -> Self {
        Self {
            id,
            severity: Severity::Error,
            message: message.into(),
            location: None,
        }
    }

    pub fn warning(id: &'static str, message: impl Into<String>) -> Self {
        Self {
            id,
            severity: Severity::Warning,
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "({},{}): ", loc.line, loc.column)?;
        }
        write!(
            f,
            "{} {}: {}",
            self.severity.to_string().to_lowercase(),
            self.id,
            self.message
        )
    }
}

/// Diagnostic identifiers.
pub mod codes {
    pub const METADATA_FILE_NOT_FOUND: &str = "CS0006";
    pub const DUPLICATE_TYPE: &str = "CS0101";
    pub const NAMESPACE_MEMBER: &str = "CS0116";
    pub const VARIABLE_UNUSED: &str = "CS0168";
    pub const VARIABLE_ASSIGNED_UNUSED: &str = "CS0219";
    pub const IDENTIFIER_EXPECTED: &str = "CS1001";
    pub const SEMICOLON_EXPECTED: &str = "CS1002";
    pub const SYNTAX_ERROR: &str = "CS1003";
    pub const NEWLINE_IN_CONSTANT: &str = "CS1010";
    pub const TOO_MANY_CHARACTERS: &str = "CS1012";
    pub const TYPE_OR_NAMESPACE_EXPECTED: &str = "CS1022";
    pub const CLOSE_PAREN_EXPECTED: &str = "CS1026";
    pub const END_OF_FILE_IN_COMMENT: &str = "CS1035";
    pub const UNTERMINATED_STRING: &str = "CS1039";
    pub const UNEXPECTED_CHARACTER: &str = "CS1056";
    pub const CLOSE_BRACE_EXPECTED: &str = "CS1513";
    pub const OPEN_BRACE_EXPECTED: &str = "CS1514";
    pub const INVALID_MEMBER_TOKEN: &str = "CS1519";
    pub const METHOD_RETURN_TYPE: &str = "CS1520";
    pub const INVALID_EXPRESSION_TERM: &str = "CS1525";
    pub const USING_AFTER_MEMBERS: &str = "CS1529";
    pub const CANNOT_WRITE_OUTPUT: &str = "CS2012";
    pub const NO_ENTRY_POINT: &str = "CS5001";
    pub const FEATURE_UNAVAILABLE: &str = "CS8370";
    pub const FILE_SCOPED_NAMESPACE: &str = "CS8954";
    pub const FILE_SCOPED_NAMESPACE_ORDER: &str = "CS8956";
}
