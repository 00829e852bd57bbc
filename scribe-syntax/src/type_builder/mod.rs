//! Fluent builders for nominal type declarations.
//!
//! [`TypeBuilder`] carries the shared logic: name, namespace, modifiers,
//! base list, member aggregation and brace/terminator placement. The
//! [`ClassBuilder`] and [`StructBuilder`] aliases select the declaration kind.

mod builder;
mod container;

pub use builder::{Class, ClassBuilder, DeclarationKind, Struct, StructBuilder, TypeBuilder};
pub use container::MemberContainer;
