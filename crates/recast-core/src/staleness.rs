//! Staleness detection over modification times.
//!
//! The cached custom binary is stale when it is older than the config source,
//! the running binary, or any library source. An absent timestamp means the
//! file does not exist; an absent cached binary is always stale.

use crate::discovery::find_sources;
use crate::paths::PathsConfig;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Modification time, `None` when the file does not exist.
pub type Timestamp = Option<SystemTime>;

pub fn timestamp(path: &Path) -> Timestamp {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// True when `cached` is absent or older than any of `inputs`.
pub fn is_stale<I>(cached: Timestamp, inputs: I) -> bool
where
    I: IntoIterator<Item = Timestamp>,
{
    match cached {
        None => true,
        // `None < Some(_)`, so absent inputs never invalidate a present cache.
        Some(t) => inputs.into_iter().any(|input| Some(t) < input),
    }
}

/// Compare the cached custom binary against everything it was built from.
pub fn needs_rebuild(paths: &PathsConfig) -> bool {
    let conf_time = timestamp(paths.config_file());
    let this_time = timestamp(&paths.running_executable);
    let temp_time = timestamp(&paths.custom_executable);

    let mut lib_files = find_sources(&paths.libs_directory);
    if paths.config_method.is_build_script() {
        if let Some(project) = paths.libs_directory.parent() {
            for file in find_sources(project) {
                if !lib_files.contains(&file) {
                    lib_files.push(file);
                }
            }
        }
    }
    let lib_times = lib_files.iter().map(|f| timestamp(f));

    let stale = is_stale(temp_time, [conf_time, this_time].into_iter().chain(lib_times));
    tracing::debug!(
        custom = %paths.custom_executable.display(),
        cached = temp_time.is_some(),
        libs = lib_files.len(),
        stale,
        "staleness check"
    );
    stale
}
