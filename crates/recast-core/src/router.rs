//! Launch routing: after the optional rebuild, pick what actually runs.

use crate::error_blob;
use crate::paths::PathsConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Run the host program, showing the build error if there is one.
    Main { error: Option<String> },
    /// Replace this process with the custom binary. `error` is set when the
    /// latest build failed and an older custom binary is being used.
    HandOff {
        custom: PathBuf,
        error: Option<String>,
    },
    /// No configuration: run the host program untouched, ignoring any
    /// leftover custom binary or error blob.
    MainIgnoringCustom,
}

pub fn route(paths: &PathsConfig, config_exists: bool) -> Route {
    if !config_exists {
        return Route::MainIgnoringCustom;
    }
    let error = error_blob::read(paths);
    if !paths.custom_executable.is_file() {
        return Route::Main { error };
    }

    // Canonicalize only now: it fails on missing files, and a symlinked
    // binary must not look like a distinct one.
    let this = paths.running_executable.canonicalize();
    let custom = paths.custom_executable.canonicalize();
    match (this, custom) {
        (Ok(this), Ok(custom)) if this != custom => Route::HandOff {
            custom: paths.custom_executable.clone(),
            error,
        },
        (Ok(_), Ok(_)) => Route::Main { error },
        (_, Err(e)) | (Err(e), _) => {
            // Vanished between the existence check and canonicalization.
            tracing::warn!("cannot resolve launch paths, treating custom binary as absent: {}", e);
            Route::Main { error }
        }
    }
}
