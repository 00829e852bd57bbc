//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod compile;
mod generate;
mod output;

pub use compile::{BuildReport, CheckReport, SourceFile};
pub use generate::GenerateReport;
pub use output::{Report, TerminalOutput};
