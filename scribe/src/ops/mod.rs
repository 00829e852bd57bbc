//! Operations behind the commands.
//!
//! Commands parse arguments and load the config; operations do the work and
//! hand back a report.

mod compile;
mod generate;

pub use compile::{build, check, check_sources};
pub use generate::{Member, TypeSpec, generate};
