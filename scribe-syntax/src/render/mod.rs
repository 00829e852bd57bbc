//! Rendering of syntax trees into source text.
//!
//! - [`FormatOptions`] / [`FormatOption`] - brace placement, indentation, spacing
//! - [`render`] - render any [`Renderable`](crate::builder::Renderable) node
//! - [`CodeSaver`] / [`SourceFile`] - render compilation units to strings or files

mod nodes;
mod options;
mod saver;

pub use nodes::render;
pub use options::{FormatOption, FormatOptions};
pub use saver::{CodeSaver, SourceFile};
