//! Compilation of generated C# source.
//!
//! [`Compiler`] takes source fragments (literal text or files), runs them
//! through the built-in [`pipeline`] and returns a [`CompileResult`] with a
//! success flag and the error-severity diagnostics. Misuse of the API
//! (empty input, unreadable files) is reported as an [`Error`] instead.
//!
//! # Module Organization
//!
//! - [`syntax`] - tokenizer and declaration parser
//! - [`pipeline`] - compilation phases and their shared context
//! - [`references`] - anchor types and library resolution
//! - [`module`] - the emitted module image
//! - [`diagnostic`] - diagnostics and their codes
//! - [`options`] - the compilation profile

mod compiler;
pub mod diagnostic;
mod error;
pub mod module;
pub mod options;
pub mod pipeline;
pub mod references;
mod result;
pub mod syntax;

pub use compiler::Compiler;
pub use diagnostic::{Diagnostic, Location, Severity};
pub use error::{Error, Result};
pub use module::Module;
pub use options::{CompilerOptions, LanguageVersion, OptimizationLevel, OutputKind};
pub use references::{AnchorType, DirectoryLocator, LogicalLocator, TypeLocator};
pub use result::{CompileResult, OutputRow};
