//! Text building blocks used by the renderer.
//!
//! - [`CodeBuilder`] - indentation-aware line buffer
//! - [`CodeFragment`] - intermediate representation for code pieces
//! - [`Renderable`] - trait for tree nodes that can be turned into fragments
//! - [`Indent`] - indentation configuration

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
