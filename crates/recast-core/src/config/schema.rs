//! Config structs grouped by concern, loaded from environment variables.

use super::env_keys::{observability as obv_keys, paths as path_keys, toolchain};
use super::loader::{env_bool, env_optional, env_or};
use std::path::PathBuf;

/// Directory overrides and debug mode taken from the environment.
///
/// Explicit values on `Params` win over these; these win over the platform
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct DirOverrides {
    pub debug: bool,
    pub config_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
}

impl DirOverrides {
    pub fn from_env() -> Self {
        Self {
            debug: env_bool(path_keys::RECAST_DEBUG, &[], false),
            config_dir: env_optional(path_keys::RECAST_CONFIG_DIR, &[]).map(PathBuf::from),
            cache_dir: env_optional(path_keys::RECAST_CACHE_DIR, &[]).map(PathBuf::from),
        }
    }
}

/// Explicit compiler locations, if the user pinned them.
#[derive(Debug, Clone, Default)]
pub struct ToolchainConfig {
    pub rustc: Option<PathBuf>,
    pub cargo: Option<PathBuf>,
    pub extern_dir: Option<PathBuf>,
}

impl ToolchainConfig {
    pub fn from_env() -> Self {
        Self {
            rustc: env_optional(toolchain::RECAST_RUSTC, toolchain::RUSTC_ALIASES)
                .map(PathBuf::from),
            cargo: env_optional(toolchain::RECAST_CARGO, toolchain::CARGO_ALIASES)
                .map(PathBuf::from),
            extern_dir: env_optional(toolchain::RECAST_EXTERN_DIR, &[]).map(PathBuf::from),
        }
    }
}

/// Observability config: quiet, log_level, log_json
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| Self {
            quiet: env_bool(obv_keys::RECAST_QUIET, &[], false),
            log_level: env_or(obv_keys::RECAST_LOG_LEVEL, &[], || "recast=info".to_string()),
            log_json: env_bool(obv_keys::RECAST_LOG_JSON, &[], false),
        })
    }
}
