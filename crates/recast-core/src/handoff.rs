//! Exec hand-off: transfer control to the custom binary.

use crate::options::{DEBUG, FORCE_RECONF, MASTER_BINARY};
use crate::store::{TransientStore, MASTER_BINARY_KEY, NAMESPACE};
use crate::{Error, Result};
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Process-image replacement. Only ever returns on failure.
pub trait ProcessExec {
    fn exec(&self, program: &Path, args: &[String]) -> Result<Infallible>;
}

/// `execv` on unix. Elsewhere the custom binary runs as a child and its exit
/// code becomes ours; the parent process stays alive until it finishes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExec;

impl ProcessExec for SystemExec {
    fn exec(&self, program: &Path, args: &[String]) -> Result<Infallible> {
        let mut cmd = Command::new(program);
        cmd.args(args);

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt as _;
            let source = cmd.exec();
            Err(Error::Exec {
                path: program.to_path_buf(),
                source,
            })
        }
        #[cfg(not(unix))]
        {
            let status = cmd.status().map_err(|source| Error::Exec {
                path: program.to_path_buf(),
                source,
            })?;
            std::process::exit(status.code().unwrap_or(1))
        }
    }
}

/// Everything the hand-off needs besides the store and the exec primitive.
#[derive(Debug, Clone)]
pub struct HandOff<'a> {
    pub custom: &'a Path,
    /// Rewritten arguments (runtime-flag segment included).
    pub args: Vec<String>,
    /// Used when the store holds no master path (or cannot be read).
    pub master: &'a Path,
    pub debug: bool,
}

/// Final argument list for the custom binary.
pub fn forwarded_args(args: Vec<String>, master: &Path, debug: bool) -> Vec<String> {
    let mut out: Vec<String> = args.into_iter().filter(|a| a != FORCE_RECONF).collect();
    if debug {
        out.push(DEBUG.to_string());
    }
    out.push(format!("{}={}", MASTER_BINARY, master.display()));
    out
}

/// Read the master path left in the store and clear it.
///
/// Store failures are logged and treated as an empty store: the master path
/// also travels on the command line.
pub fn take_master(store: &mut dyn TransientStore) -> Option<PathBuf> {
    let master = store
        .get(NAMESPACE, MASTER_BINARY_KEY)
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cannot read hand-off store");
            None
        })
        .map(PathBuf::from);
    if let Err(e) = store.clear(NAMESPACE) {
        tracing::warn!(error = %e, "cannot clear hand-off store");
    }
    master
}

/// Clear the transient store and replace this process with the custom
/// binary. Returns only if the exec failed.
pub fn hand_off(
    request: HandOff<'_>,
    store: &mut dyn TransientStore,
    exec: &dyn ProcessExec,
    status_out: &dyn Fn(&str),
) -> Result<Infallible> {
    let master = take_master(store).unwrap_or_else(|| request.master.to_path_buf());

    status_out(&format!("Launching custom binary {}\n", request.custom.display()));
    let args = forwarded_args(request.args, &master, request.debug);
    tracing::debug!(custom = %request.custom.display(), ?args, "exec hand-off");
    exec.exec(request.custom, &args)
}
