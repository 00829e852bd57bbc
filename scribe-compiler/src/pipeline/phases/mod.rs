mod declare;
mod emit;
mod parse;
mod references;

pub use declare::DeclarePhase;
pub use emit::EmitPhase;
pub use parse::ParsePhase;
pub use references::ReferencePhase;
