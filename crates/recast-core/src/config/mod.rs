//! Recast configuration layer
//!
//! Every environment variable the engine reads goes through this module; the
//! engine itself accesses structured config instead of calling `std::env::var`.
//!
//! - `loader`: `env_or`, `env_optional`, `env_bool` helpers
//! - `schema`: `ObservabilityConfig`, `DirOverrides`
//! - `env_keys`: key constants

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or};
pub use schema::{DirOverrides, ObservabilityConfig, ToolchainConfig};
