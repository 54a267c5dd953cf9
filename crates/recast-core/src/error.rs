//! Engine error types.
//!
//! Build failures are not errors here: they are captured as text, persisted to
//! the error blob and shown through the host program's error display.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Replacing the process image with the custom binary failed. Fatal.
    #[error("failed to exec custom binary {path}: {source}")]
    Exec {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot determine running executable: {0}")]
    CurrentExe(#[source] io::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("corrupt hand-off store {path}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
