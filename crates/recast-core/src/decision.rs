//! Reconfiguration decision: whether this start should invoke the build.

/// Outcome of the decision step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The engine is disabled; run the main program untouched.
    Skip,
    Rebuild,
    NoRebuild,
}

/// User-level overrides parsed from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverrideFlags {
    pub force_reconf: bool,
    pub deny_reconf: bool,
}

/// Decide whether to rebuild.
///
/// `stale` is only evaluated when neither override settles the answer, so a
/// forced or denied start never touches the filesystem for timestamps.
pub fn decide<F>(config_check: bool, config_exists: bool, flags: OverrideFlags, stale: F) -> Decision
where
    F: FnOnce() -> bool,
{
    if !config_check {
        return Decision::Skip;
    }
    match (config_exists, flags.deny_reconf, flags.force_reconf) {
        (false, _, _) => Decision::NoRebuild,
        (true, true, _) => Decision::NoRebuild,
        (true, false, true) => Decision::Rebuild,
        (true, false, false) => {
            if stale() {
                Decision::Rebuild
            } else {
                Decision::NoRebuild
            }
        }
    }
}
