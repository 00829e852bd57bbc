use serde::Deserialize;

use crate::builder::Indent;

/// Formatting applied when rendering a tree. Formatting never changes the
/// structure of the tree, only where braces, indentation and blank lines go.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormatOptions {
    /// Open brace of namespaces and types on its own line.
    pub new_lines_for_braces_in_types: bool,
    /// Open brace of methods and constructors on its own line.
    pub new_lines_for_braces_in_methods: bool,
    pub indentation: Indent,
    /// Blank line between members; consecutive fields stay together.
    pub blank_line_between_members: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            new_lines_for_braces_in_types: true,
            new_lines_for_braces_in_methods: true,
            indentation: Indent::CSHARP,
            blank_line_between_members: true,
        }
    }
}

/// A single option override: the variant is the key, its payload the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOption {
    NewLinesForBracesInTypes(bool),
    NewLinesForBracesInMethods(bool),
    Indentation(Indent),
    BlankLineBetweenMembers(bool),
}

impl FormatOptions {
    /// Defaults with the given overrides applied in order.
    pub fn with_overrides(overrides: impl IntoIterator<Item = FormatOption>) -> Self {
        let mut options = Self::default();
        for option in overrides {
            options.apply(option);
        }
        options
    }

    pub fn apply(&mut self, option: FormatOption) {
        match option {
            FormatOption::NewLinesForBracesInTypes(v) => self.new_lines_for_braces_in_types = v,
            FormatOption::NewLinesForBracesInMethods(v) => self.new_lines_for_braces_in_methods = v,
            FormatOption::Indentation(indent) => self.indentation = indent,
            FormatOption::BlankLineBetweenMembers(v) => self.blank_line_between_members = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_in_order() {
        let options = FormatOptions::with_overrides([
            FormatOption::NewLinesForBracesInMethods(false),
            FormatOption::Indentation(Indent::Tab),
            FormatOption::NewLinesForBracesInMethods(true),
        ]);
        assert!(options.new_lines_for_braces_in_methods);
        assert_eq!(options.indentation, Indent::Tab);
        assert!(options.new_lines_for_braces_in_types);
    }
}
