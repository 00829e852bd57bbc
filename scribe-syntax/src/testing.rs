//! Helpers for comparing rendered code in tests.

/// Remove spaces, tabs and line breaks so renderings can be compared
/// independently of formatting.
pub fn remove_whitespace(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\r' | '\n'))
        .collect()
}
