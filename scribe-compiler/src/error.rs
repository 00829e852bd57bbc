use std::path::PathBuf;

use thiserror::Error;

/// Result type for cscribe-compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures caused by how the compiler was called.
///
/// Code that fails to compile is not an error: it is reported through
/// [`CompileResult`](crate::CompileResult).
#[derive(Debug, Error)]
pub enum Error {
    #[error("value cannot be an empty collection: '{parameter}'")]
    EmptyInput { parameter: &'static str },

    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid module image: {reason}")]
    InvalidModule { reason: String },

    #[error("compilation task did not complete")]
    Background(#[from] tokio::task::JoinError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
