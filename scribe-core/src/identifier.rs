//! Identifier rules of the target language.

/// Reserved keywords. Using one as an identifier requires the `@` prefix.
pub const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Returns true if `s` is a reserved keyword.
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Returns true if `s` is shaped like an identifier: a letter or underscore
/// followed by letters, digits or underscores. Keywords are identifier-shaped.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Escape a reserved keyword with the verbatim `@` prefix.
///
/// ```
/// use cscribe_core::escape_identifier;
///
/// assert_eq!(escape_identifier("class"), "@class");
/// assert_eq!(escape_identifier("value"), "value");
/// ```
pub fn escape_identifier(s: &str) -> String {
    if is_keyword(s) {
        format!("@{s}")
    } else {
        s.to_string()
    }
}
