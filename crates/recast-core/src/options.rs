//! Recognition of the engine's own command-line flags.
//!
//! The flags are removed from the argument list before the host program sees
//! it, so the program's parser never has to know about them.

use crate::decision::OverrideFlags;
use std::path::PathBuf;

/// Rebuild even if the custom binary looks fresh.
pub const FORCE_RECONF: &str = "--force-reconf";
/// Never rebuild on this start.
pub const DENY_RECONF: &str = "--deny-reconf";
/// Resolve every path relative to the working directory.
pub const DEBUG: &str = "--recast-debug";
/// `--recast-master-binary=<path>`: set by the master when handing off.
pub const MASTER_BINARY: &str = "--recast-master-binary";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub flags: OverrideFlags,
    pub debug: bool,
    pub master_binary: Option<PathBuf>,
    /// Arguments left for the host program.
    pub program_args: Vec<String>,
}

/// Strip engine flags out of `args` (program name excluded).
pub fn parse<I>(args: I) -> LaunchOptions
where
    I: IntoIterator<Item = String>,
{
    let master_prefix = format!("{MASTER_BINARY}=");
    let mut opts = LaunchOptions::default();
    for arg in args {
        match arg.as_str() {
            FORCE_RECONF => opts.flags.force_reconf = true,
            DENY_RECONF => opts.flags.deny_reconf = true,
            DEBUG => opts.debug = true,
            other => match other.strip_prefix(&master_prefix) {
                Some(path) if !path.is_empty() => opts.master_binary = Some(PathBuf::from(path)),
                Some(_) => {}
                None => opts.program_args.push(other.to_string()),
            },
        }
    }
    opts
}

/// Raw arguments of this process, program name excluded.
///
/// Non-UTF-8 arguments are converted lossily.
pub fn raw_args() -> Vec<String> {
    std::env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_strips_engine_flags() {
        let opts = parse(args(&[
            "--name",
            "--force-reconf",
            "world",
            "--deny-reconf",
            "--recast-debug",
            "--recast-master-binary=/usr/bin/demo",
        ]));
        assert!(opts.flags.force_reconf);
        assert!(opts.flags.deny_reconf);
        assert!(opts.debug);
        assert_eq!(opts.master_binary, Some(PathBuf::from("/usr/bin/demo")));
        assert_eq!(opts.program_args, args(&["--name", "world"]));
    }

    #[test]
    fn test_parse_plain_args() {
        let opts = parse(args(&["-v", "file.txt"]));
        assert_eq!(opts.flags, OverrideFlags::default());
        assert!(!opts.debug);
        assert_eq!(opts.master_binary, None);
        assert_eq!(opts.program_args, args(&["-v", "file.txt"]));
    }

    #[test]
    fn test_empty_master_binary_ignored() {
        let opts = parse(args(&["--recast-master-binary="]));
        assert_eq!(opts.master_binary, None);
        assert!(opts.program_args.is_empty());
    }
}
