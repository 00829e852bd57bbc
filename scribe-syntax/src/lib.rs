//! Syntax trees and fluent builders for type declarations of a
//! statically-typed, curly-brace target language.
//!
//! # Module Organization
//!
//! - [`tree`] - immutable syntax tree nodes
//! - [`type_builder`] - `ClassBuilder` / `StructBuilder` and the member container
//! - [`generators`] - leaf generators for fields, properties, parameters,
//!   constructors and methods
//! - [`render`] - rendering trees to text (`CodeSaver`, `FormatOptions`)
//! - [`builder`] - low-level text building blocks (`CodeBuilder`, `CodeFragment`)
//! - [`testing`] - helpers for comparing rendered code

pub mod builder;
pub mod generators;
pub mod render;
pub mod testing;
pub mod tree;
pub mod type_builder;

pub use render::CodeSaver;
pub use type_builder::{ClassBuilder, StructBuilder};
