//! Core utilities and types for the cscribe toolkit.
//!
//! This crate provides the pieces shared by the builders and the compiler:
//! identifier rules of the target language and generated-file writing.

mod error;
mod file;
mod identifier;

pub use error::{Error, Result};
// File operations
pub use file::{File, FileRules, GeneratedFile, Overwrite, WriteResult};
// Identifier rules
pub use identifier::{KEYWORDS, escape_identifier, is_identifier, is_keyword};
