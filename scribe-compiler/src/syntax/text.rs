use crate::diagnostic::Location;

/// Source text with precomputed line starts for offset-to-position lookups.
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
    line_starts: Vec<usize>,
    index: usize,
}

impl SourceText {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            text,
            line_starts,
            index,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based line and column of a byte offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let start = self.line_starts[line];
        let column = self.text[start..offset].chars().count() + 1;
        (line + 1, column)
    }

    pub fn location(&self, offset: usize, length: usize) -> Location {
        let (line, column) = self.line_col(offset);
        Location {
            source: self.index,
            offset,
            length,
            line,
            column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let text = SourceText::new("ab\ncd\n\nef", 0);
        assert_eq!(text.line_col(0), (1, 1));
        assert_eq!(text.line_col(1), (1, 2));
        assert_eq!(text.line_col(3), (2, 1));
        assert_eq!(text.line_col(6), (3, 1));
        assert_eq!(text.line_col(8), (4, 2));
    }
}
