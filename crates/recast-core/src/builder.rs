//! Contract of the build collaborator.
//!
//! Implementations compile the user configuration into
//! `PathsConfig::custom_executable`. On failure they persist the compiler
//! output with [`crate::error_blob::write`] and leave any previously cached
//! binary untouched; on success they clear the blob.

use crate::paths::PathsConfig;
use std::path::PathBuf;
use thiserror::Error;

/// Extra compiler inputs supplied by the embedding program.
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    /// Library search paths.
    pub include_dirs: Vec<PathBuf>,
    /// Crates made visible to the configuration as `name=path`. Without a
    /// path the compiler finds the crate in `include_dirs`.
    pub externs: Vec<(String, Option<PathBuf>)>,
    /// Crate names withheld from the configuration even if listed in `externs`.
    pub hidden: Vec<String>,
    /// Passed to the compiler verbatim, last.
    pub extra_flags: Vec<String>,
}

/// A failed build. The text is what the user gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct BuildFailure(pub String);

pub trait Builder {
    fn build(&self, paths: &PathsConfig, request: &BuildRequest) -> Result<(), BuildFailure>;
}
