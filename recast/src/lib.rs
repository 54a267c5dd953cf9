//! Recast: reconfigure a compiled Rust program through a source file.
//!
//! A host program wraps its entry point with [`wrap_main`]. On every start
//! the user's configuration (`<config dir>/<app>.rs`, or a cargo project when a
//! `Cargo.toml` sits next to it) is compared against the cached custom build;
//! stale builds are recompiled and the process execs into the custom binary.
//! Build errors are handed to the host through `Params::show_error`.

pub mod greeter;

pub use recast_build::RustBuilder;
pub use recast_core::{
    observability, options, BuildRequest, Error, Invocation, Launch, Launcher, Params, Result,
    RuntimeFlagPolicy, Sentinels, SystemExec,
};

/// Run `params.real_main` with `cfg`, or hand off to the user's custom build.
///
/// Uses the Rust toolchain on `PATH` (or `RECAST_RUSTC` / `RECAST_CARGO`) and
/// replaces the process image on hand-off, in which case this never returns.
pub fn wrap_main<C, R>(params: Params<C, R>, cfg: C) -> Result<R> {
    let builder = RustBuilder::new(params.app_name.clone());
    let invocation = Invocation::current()?;
    Launcher::new(&builder, &SystemExec).run(params, cfg, invocation)
}
