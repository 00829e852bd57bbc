use std::{collections::BTreeSet, fmt};

/// A declaration modifier.
///
/// Variants are declared in the canonical order the target language expects,
/// so sorting modifiers yields a well-formed modifier list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Internal,
    File,
    New,
    Static,
    Extern,
    Virtual,
    Abstract,
    Sealed,
    Override,
    Const,
    Readonly,
    Unsafe,
    Required,
    Volatile,
    Async,
    /// Always last, directly before the type keyword.
    Partial,
}

impl Modifier {
    /// The keyword for this modifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::File => "file",
            Self::New => "new",
            Self::Static => "static",
            Self::Extern => "extern",
            Self::Virtual => "virtual",
            Self::Abstract => "abstract",
            Self::Sealed => "sealed",
            Self::Override => "override",
            Self::Const => "const",
            Self::Readonly => "readonly",
            Self::Unsafe => "unsafe",
            Self::Required => "required",
            Self::Volatile => "volatile",
            Self::Async => "async",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered, duplicate-free modifier set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers(BTreeSet<Modifier>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    /// Modifiers in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }

    /// Render as a keyword prefix, e.g. `"public static "`; empty when no
    /// modifiers are set.
    pub fn prefix(&self) -> String {
        self.iter().map(|m| format!("{m} ")).collect()
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Modifier; N]> for Modifiers {
    fn from(modifiers: [Modifier; N]) -> Self {
        modifiers.into_iter().collect()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, modifier) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{modifier}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let modifiers = Modifiers::from([Modifier::Partial, Modifier::Static, Modifier::Public]);
        assert_eq!(modifiers.to_string(), "public static partial");
    }

    #[test]
    fn test_duplicates_collapse() {
        let modifiers: Modifiers = [Modifier::Readonly, Modifier::Private, Modifier::Readonly]
            .into_iter()
            .collect();
        assert_eq!(modifiers.to_string(), "private readonly");
    }

    #[test]
    fn test_combined_access() {
        let modifiers = Modifiers::from([Modifier::Internal, Modifier::Protected]);
        assert_eq!(modifiers.to_string(), "protected internal");
    }

    #[test]
    fn test_prefix() {
        assert_eq!(Modifiers::new().prefix(), "");
        assert_eq!(Modifiers::from([Modifier::Public]).prefix(), "public ");
    }
}
