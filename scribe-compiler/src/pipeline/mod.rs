//! Compilation pipeline.
//!
//! A compile request runs through a fixed sequence of phases that share a
//! [`CompilationContext`]:
//!
//! 1. [`ParsePhase`] - tokenize and parse every source fragment
//! 2. [`ReferencePhase`] - resolve explicit and anchor references
//! 3. [`DeclarePhase`] - declaration checks across fragments
//! 4. [`EmitPhase`] - write the module image if nothing failed

mod context;
mod phase;
mod phases;
mod runner;

pub use context::CompilationContext;
pub use phase::{Phase, PhaseInfo};
pub use phases::{DeclarePhase, EmitPhase, ParsePhase, ReferencePhase};
pub use runner::Pipeline;
