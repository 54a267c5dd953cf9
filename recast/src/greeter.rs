//! A small reconfigurable program: prints a greeting.
//!
//! Users customize it with `~/.config/recast/recast.rs`:
//!
//! ```no_run
//! use recast::greeter::{launch, Settings};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     launch(Settings {
//!         greeting: "Howdy".to_string(),
//!         shout: true,
//!         ..Settings::default()
//!     })?;
//!     Ok(())
//! }
//! ```
//!
//! A single file is compiled with `rustc`, which has to find this crate:
//! point `RECAST_EXTERN_DIR` at the `target/release/deps` directory of a
//! recast build. Alternatively put a `Cargo.toml` depending on `recast` next
//! to it and move the file to `src/main.rs`; cargo then resolves everything.

use crate::{wrap_main, BuildRequest, Launch, Params};
use anyhow::Result;
use clap::Parser;
use recast_core::config::ToolchainConfig;
use std::io::Write;
use std::path::PathBuf;

pub const APP_NAME: &str = "recast";

/// Everything the user's configuration can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub greeting: String,
    pub shout: bool,
    /// Set when the user's configuration failed to build.
    pub error: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            greeting: "Hello".to_string(),
            shout: false,
            error: None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "recast")]
#[command(author, version, about = "Greets you, the way your configuration says", long_about = None)]
pub struct Cli {
    /// Who to greet
    #[arg(default_value = "world")]
    pub name: String,

    /// Print in upper case regardless of configuration
    #[arg(long)]
    pub shout: bool,
}

/// Entry point shared by the default binary and user configurations.
pub fn launch(settings: Settings) -> Result<()> {
    tracing::debug!(?settings, "launching greeter");
    let mut params = Params::with_launch(APP_NAME, real_main, show_error);
    params.build = build_request(ToolchainConfig::from_env().extern_dir);
    wrap_main(params, settings)?
}

/// Compiler inputs that make `use recast::...` resolve in a single-file
/// configuration.
pub fn build_request(extern_dir: Option<PathBuf>) -> BuildRequest {
    let mut request = BuildRequest::default();
    if let Some(dir) = extern_dir {
        request.include_dirs.push(dir);
        request.externs.push(("recast".to_string(), None));
    }
    request
}

fn show_error(mut settings: Settings, error: &str) -> Settings {
    settings.error = Some(error.to_string());
    settings
}

fn real_main(settings: Settings, launch: &Launch) -> Result<()> {
    tracing::debug!(master = %launch.master_binary().display(), "greeter running");
    let args = launch.program_args().iter().cloned();
    let cli = Cli::parse_from(std::iter::once(APP_NAME.to_string()).chain(args));
    let mut out = std::io::stdout().lock();
    render(&settings, &cli, &mut out)?;
    Ok(())
}

/// Write the greeting, preceded by the build error if there is one.
pub fn render(settings: &Settings, cli: &Cli, out: &mut impl Write) -> std::io::Result<()> {
    if let Some(error) = &settings.error {
        writeln!(out, "Your configuration failed to build; using defaults.")?;
        for line in error.lines() {
            writeln!(out, "  | {}", line)?;
        }
    }
    let line = format!("{}, {}!", settings.greeting, cli.name);
    if settings.shout || cli.shout {
        writeln!(out, "{}", line.to_uppercase())
    } else {
        writeln!(out, "{}", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("recast").chain(args.iter().copied()))
    }

    fn rendered(settings: &Settings, cli: &Cli) -> String {
        let mut buf = Vec::new();
        render(settings, cli, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_default_greeting() {
        assert_eq!(rendered(&Settings::default(), &cli(&[])), "Hello, world!\n");
    }

    #[test]
    fn test_configured_greeting_and_shout() {
        let settings = Settings {
            greeting: "Howdy".to_string(),
            shout: true,
            error: None,
        };
        assert_eq!(rendered(&settings, &cli(&["partner"])), "HOWDY, PARTNER!\n");
    }

    #[test]
    fn test_build_request_exposes_recast_crate() {
        assert!(build_request(None).externs.is_empty());

        let request = build_request(Some(PathBuf::from("/opt/recast/target/release/deps")));
        assert_eq!(request.include_dirs, vec![PathBuf::from("/opt/recast/target/release/deps")]);
        assert_eq!(request.externs, vec![("recast".to_string(), None)]);
    }

    #[test]
    fn test_build_error_is_displayed() {
        let settings = show_error(Settings::default(), "error: expected `;`\n --> recast.rs:1:9");
        let out = rendered(&settings, &cli(&[]));
        assert!(out.starts_with("Your configuration failed to build"));
        assert!(out.contains("  | error: expected `;`"));
        assert!(out.ends_with("Hello, world!\n"));
    }
}
