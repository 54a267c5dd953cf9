//! Locating `rustc` and `cargo`.

use recast_core::config::ToolchainConfig;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Toolchain {
    pub rustc: PathBuf,
    pub cargo: PathBuf,
}

impl Toolchain {
    /// `RECAST_RUSTC` / `RECAST_CARGO` (or `RUSTC` / `CARGO`), then `PATH`.
    pub fn from_env() -> Self {
        let cfg = ToolchainConfig::from_env();
        Self {
            rustc: resolve_tool(cfg.rustc, "rustc"),
            cargo: resolve_tool(cfg.cargo, "cargo"),
        }
    }
}

/// Explicit path, else a `PATH` lookup, else the bare name.
pub fn resolve_tool(explicit: Option<PathBuf>, name: &str) -> PathBuf {
    explicit
        .or_else(|| which::which(name).ok())
        .unwrap_or_else(|| PathBuf::from(name))
}
