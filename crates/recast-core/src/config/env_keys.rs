//! Environment variable keys.

/// Path overrides and debug mode
pub mod paths {
    /// Confine config and cache directories to the working directory.
    pub const RECAST_DEBUG: &str = "RECAST_DEBUG";

    pub const RECAST_CONFIG_DIR: &str = "RECAST_CONFIG_DIR";

    pub const RECAST_CACHE_DIR: &str = "RECAST_CACHE_DIR";
}

/// Compiler lookup
pub mod toolchain {
    pub const RECAST_RUSTC: &str = "RECAST_RUSTC";
    pub const RUSTC_ALIASES: &[&str] = &["RUSTC"];

    pub const RECAST_CARGO: &str = "RECAST_CARGO";
    pub const CARGO_ALIASES: &[&str] = &["CARGO"];

    /// Directory holding the host's compiled library and its dependencies
    /// (typically `target/release/deps`), for single-file configurations.
    pub const RECAST_EXTERN_DIR: &str = "RECAST_EXTERN_DIR";
}

/// Observability and logging
pub mod observability {
    pub const RECAST_QUIET: &str = "RECAST_QUIET";

    pub const RECAST_LOG_LEVEL: &str = "RECAST_LOG_LEVEL";

    pub const RECAST_LOG_JSON: &str = "RECAST_LOG_JSON";
}
