//! Renderable trait and CodeFragment for decoupled rendering.
//!
//! Tree nodes are turned into fragments first and written by a
//! [`CodeBuilder`](super::CodeBuilder) second, so brace placement and
//! indentation never leak into the tree itself.

use crate::render::FormatOptions;

/// Represents a fragment of rendered code.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// A block with header, body fragments, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// Indent the contained fragments.
    Indent(Vec<CodeFragment>),
    /// A sequence of fragments.
    Sequence(Vec<CodeFragment>),
}

impl CodeFragment {
    /// Create a line fragment.
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// Create a block fragment.
    pub fn block(header: impl Into<String>, body: Vec<CodeFragment>, close: Option<String>) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    /// A braced section: `head {` ... `}` on the same line, or the open
    /// brace on its own line when `next_line` is set.
    pub fn braced(head: impl Into<String>, body: Vec<CodeFragment>, next_line: bool) -> Self {
        let head = head.into();
        if next_line {
            Self::Sequence(vec![
                Self::Line(head),
                Self::line("{"),
                Self::Indent(body),
                Self::line("}"),
            ])
        } else {
            Self::block(format!("{head} {{"), body, Some("}".to_string()))
        }
    }
}

/// Trait for tree nodes that can be converted to code fragments.
pub trait Renderable {
    /// Convert this node to a sequence of code fragments.
    fn to_fragments(&self, options: &FormatOptions) -> Vec<CodeFragment>;
}
