//! Recast Core: let end users reconfigure a compiled program through a source
//! file that is rebuilt on demand and relaunched in place of the original.
//!
//! On every start the engine resolves its paths, checks whether the cached
//! custom binary is stale, optionally asks a [`Builder`] to rebuild it, and then
//! either runs the host program or execs into the custom binary.

pub mod builder;
pub mod config;
pub mod decision;
pub mod discovery;
pub mod error;
pub mod error_blob;
pub mod handoff;
pub mod launcher;
pub mod observability;
pub mod options;
pub mod paths;
pub mod router;
pub mod runtime_args;
pub mod staleness;
pub mod store;

pub use builder::{BuildFailure, BuildRequest, Builder};
pub use decision::{Decision, OverrideFlags};
pub use error::{Error, Result};
pub use handoff::{ProcessExec, SystemExec};
pub use launcher::{Invocation, Launch, Launcher, Params};
pub use paths::{ConfigMethod, PathsConfig};
pub use runtime_args::{RuntimeFlagPolicy, Sentinels};
pub use store::{FileStore, MemoryStore, TransientStore};
