//! Runtime-flag segment handling.
//!
//! An invocation may carry a segment of runtime flags meant for the execution
//! environment rather than the program's own parser:
//!
//! ```text
//! prog --verbose +RTS -N4 -A64m -RTS input.txt +RTS -s --RTS +RTS-is-literal
//! ```
//!
//! `+RTS` opens a segment, `-RTS` closes it and `--RTS` ends runtime-flag
//! processing altogether; everything after it is an ordinary argument. Before
//! the terminator the markers themselves never reach the program: a nested
//! `+RTS` and a `-RTS` with no open segment are dropped. Before
//! handing off to the custom binary the segment is extracted, edited according
//! to a [`RuntimeFlagPolicy`] and reassembled in front of the ordinary
//! arguments.

/// Delimiter tokens of the runtime-flag segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinels {
    pub entry: String,
    pub exit: String,
    pub terminator: String,
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            entry: "+RTS".to_string(),
            exit: "-RTS".to_string(),
            terminator: "--RTS".to_string(),
        }
    }
}

/// What to do with the runtime flags of the current invocation when
/// forwarding them to the custom binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeFlagPolicy {
    /// Drop the current flags and pass exactly these.
    ReplaceWith(Vec<String>),
    /// Keep the current flags and add these after them.
    AppendTo(Vec<String>),
}

impl Default for RuntimeFlagPolicy {
    fn default() -> Self {
        Self::AppendTo(Vec::new())
    }
}

impl RuntimeFlagPolicy {
    pub fn apply(&self, extracted: Vec<String>) -> Vec<String> {
        match self {
            Self::ReplaceWith(list) => list.clone(),
            Self::AppendTo(list) => {
                let mut flags = extracted;
                flags.extend(list.iter().cloned());
                flags
            }
        }
    }
}

/// An invocation split into its runtime flags and ordinary arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitArgs {
    pub runtime: Vec<String>,
    pub ordinary: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    Inside,
}

/// Split raw arguments (program name excluded) into runtime flags and
/// ordinary arguments.
pub fn split(args: &[String], sentinels: &Sentinels) -> SplitArgs {
    let mut out = SplitArgs::default();
    let mut state = ScanState::Outside;
    for (i, arg) in args.iter().enumerate() {
        if *arg == sentinels.terminator {
            out.ordinary.extend(args[i + 1..].iter().cloned());
            break;
        }
        match state {
            ScanState::Outside if *arg == sentinels.entry => state = ScanState::Inside,
            // Unmatched, e.g. the outer half of `+RTS a +RTS b -RTS -RTS`.
            ScanState::Outside if *arg == sentinels.exit => {}
            ScanState::Outside => out.ordinary.push(arg.clone()),
            ScanState::Inside if *arg == sentinels.exit => state = ScanState::Outside,
            // A repeated entry marker inside a segment opens nothing new.
            ScanState::Inside if *arg == sentinels.entry => {}
            ScanState::Inside => out.runtime.push(arg.clone()),
        }
    }
    out
}

/// Flat list of runtime flags found anywhere in `args`.
pub fn extract_runtime_flags(args: &[String], sentinels: &Sentinels) -> Vec<String> {
    split(args, sentinels).runtime
}

/// Build the argument list for the custom binary.
///
/// `full` is the complete raw invocation, `ordinary` the arguments the
/// program itself sees.
///
/// # Panics
///
/// If the edited flag list contains the terminator sentinel.
pub fn rewrite(
    full: &[String],
    ordinary: &[String],
    policy: &RuntimeFlagPolicy,
    sentinels: &Sentinels,
) -> Vec<String> {
    let flags = policy.apply(extract_runtime_flags(full, sentinels));
    assert!(
        !flags.contains(&sentinels.terminator),
        "runtime flags must not contain {}",
        sentinels.terminator
    );

    let mut out = Vec::with_capacity(flags.len() + ordinary.len() + 2);
    if flags.is_empty() {
        let needs_guard = ordinary.iter().any(|a| {
            *a == sentinels.entry || *a == sentinels.exit || *a == sentinels.terminator
        });
        if needs_guard {
            out.push(sentinels.terminator.clone());
        }
    } else {
        out.push(sentinels.entry.clone());
        out.extend(flags);
        out.push(sentinels.terminator.clone());
    }
    out.extend(ordinary.iter().cloned());
    out
}
