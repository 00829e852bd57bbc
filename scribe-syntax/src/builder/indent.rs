//! Indentation configuration for rendered code.

use serde::Deserialize;

/// Indentation style for rendered code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// Four spaces, the conventional style for the target language.
    pub const CSHARP: Self = Self::Spaces(4);

    /// Append `level` indentation units to `buf`.
    pub fn write_to(&self, buf: &mut String, level: usize) {
        match self {
            Self::Spaces(width) => {
                let width = usize::from(*width);
                buf.extend(std::iter::repeat_n(' ', width * level));
            }
            Self::Tab => buf.extend(std::iter::repeat_n('\t', level)),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CSHARP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(indent: Indent, level: usize) -> String {
        let mut buf = String::new();
        indent.write_to(&mut buf, level);
        buf
    }

    #[test]
    fn test_write_to() {
        assert_eq!(render(Indent::Spaces(2), 2), "    ");
        assert_eq!(render(Indent::Spaces(4), 1), "    ");
        assert_eq!(render(Indent::Spaces(3), 1), "   ");
        assert_eq!(render(Indent::Tab, 3), "\t\t\t");
        assert_eq!(render(Indent::CSHARP, 0), "");
    }

    #[test]
    fn test_default() {
        assert_eq!(Indent::default(), Indent::Spaces(4));
    }
}
