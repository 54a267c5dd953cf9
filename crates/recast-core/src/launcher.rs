//! Startup orchestration: decide, rebuild, route, hand off or run main.
//!
//! ```text
//! args ─ split runtime flags ─ parse engine flags ─ resolve paths
//!      ─ decide ─┬─ Skip ────────────────────────────────────── real_main
//!                └─ Builder (on Rebuild) ─ route ─┬─ HandOff ── exec custom binary
//!                                                 └─ Main ──── show_error? ── real_main
//! ```

use crate::builder::{BuildRequest, Builder};
use crate::config::DirOverrides;
use crate::decision::{decide, Decision};
use crate::handoff::{hand_off, take_master, HandOff, ProcessExec};
use crate::options::{self, DENY_RECONF};
use crate::paths::{self, PathRequest, PathsConfig};
use crate::router::{route, Route};
use crate::runtime_args::{self, RuntimeFlagPolicy, Sentinels};
use crate::staleness::needs_rebuild;
use crate::store::{FileStore, TransientStore, MASTER_BINARY_KEY, NAMESPACE};
use crate::Result;
use std::path::{Path, PathBuf};

/// How a host program embeds the engine.
///
/// `C` is the host's configuration type, `R` what its main returns.
pub struct Params<C, R> {
    /// Names the config source (`<app>.rs`), the default directories and the
    /// custom binary.
    pub app_name: String,
    /// `false` disables the engine entirely: `real_main` runs directly.
    pub config_check: bool,
    pub config_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    /// File name (e.g. `Cargo.toml`) selecting project builds when present in
    /// the config directory.
    pub build_script: Option<String>,
    pub real_main: Box<dyn FnOnce(C, &Launch) -> R>,
    /// Folds a build error into the configuration the host will run with.
    pub show_error: Box<dyn Fn(C, &str) -> C>,
    /// Routine status lines ("Launching custom binary ...").
    pub status_out: Box<dyn Fn(&str)>,
    pub runtime_flags: RuntimeFlagPolicy,
    pub sentinels: Sentinels,
    pub build: BuildRequest,
}

impl<C: 'static, R: 'static> Params<C, R> {
    pub fn new(
        app_name: impl Into<String>,
        real_main: impl FnOnce(C) -> R + 'static,
        show_error: impl Fn(C, &str) -> C + 'static,
    ) -> Self {
        Self::with_launch(app_name, move |cfg: C, _: &Launch| real_main(cfg), show_error)
    }

    /// Like [`Params::new`], for a main that wants to see the [`Launch`].
    pub fn with_launch(
        app_name: impl Into<String>,
        real_main: impl FnOnce(C, &Launch) -> R + 'static,
        show_error: impl Fn(C, &str) -> C + 'static,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            config_check: true,
            config_dir: None,
            cache_dir: None,
            build_script: Some("Cargo.toml".to_string()),
            real_main: Box::new(real_main),
            show_error: Box::new(show_error),
            status_out: Box::new(|s: &str| eprint!("{}", s)),
            runtime_flags: RuntimeFlagPolicy::default(),
            sentinels: Sentinels::default(),
            build: BuildRequest::default(),
        }
    }
}

/// What the engine tells the host's main about this start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    master_binary: PathBuf,
    program_args: Vec<String>,
}

impl Launch {
    /// The original (non-custom) binary. In a custom binary this is the
    /// executable that handed off to it, otherwise the running executable.
    pub fn master_binary(&self) -> &Path {
        &self.master_binary
    }

    /// Arguments meant for the host itself: engine flags and the runtime-flag
    /// segment removed.
    pub fn program_args(&self) -> &[String] {
        &self.program_args
    }
}

/// Process facts the engine reads once at startup.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Raw arguments, program name excluded.
    pub args: Vec<String>,
    pub running_executable: PathBuf,
    pub cwd: PathBuf,
    pub overrides: DirOverrides,
}

impl Invocation {
    pub fn current() -> Result<Self> {
        Ok(Self {
            args: options::raw_args(),
            running_executable: std::env::current_exe().map_err(crate::Error::CurrentExe)?,
            cwd: std::env::current_dir()
                .map_err(|e| crate::Error::io("cannot read working directory", e))?,
            overrides: DirOverrides::from_env(),
        })
    }
}

/// Runs the engine with explicit collaborators.
pub struct Launcher<'a> {
    builder: &'a dyn Builder,
    exec: &'a dyn ProcessExec,
    store: Option<Box<dyn TransientStore>>,
}

impl<'a> Launcher<'a> {
    pub fn new(builder: &'a dyn Builder, exec: &'a dyn ProcessExec) -> Self {
        Self {
            builder,
            exec,
            store: None,
        }
    }

    /// Use `store` instead of `<cache>/handoff.json`.
    pub fn with_store(mut self, store: Box<dyn TransientStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Run the host program (or hand off to its custom build).
    ///
    /// Returns `real_main`'s result when this process runs the host itself.
    /// A successful hand-off never returns; a failed one is an error.
    pub fn run<C, R>(self, params: Params<C, R>, cfg: C, invocation: Invocation) -> Result<R> {
        let split = runtime_args::split(&invocation.args, &params.sentinels);
        let opts = options::parse(split.ordinary);
        let debug = opts.debug || invocation.overrides.debug;
        let req = PathRequest {
            app_name: &params.app_name,
            config_dir: params
                .config_dir
                .as_deref()
                .or(invocation.overrides.config_dir.as_deref()),
            cache_dir: params
                .cache_dir
                .as_deref()
                .or(invocation.overrides.cache_dir.as_deref()),
            build_script: params.build_script.as_deref(),
            debug,
        };
        let paths = paths::resolve(&req, invocation.running_executable.clone(), &invocation.cwd);
        tracing::debug!(?paths, "resolved paths");

        let launch = Launch {
            master_binary: opts
                .master_binary
                .clone()
                .unwrap_or_else(|| invocation.running_executable.clone()),
            program_args: opts.program_args.clone(),
        };
        let config_exists = params.config_check && paths.config_file().is_file();
        let decision = decide(params.config_check, config_exists, opts.flags, || needs_rebuild(&paths));
        tracing::debug!(config_exists, flags = ?opts.flags, ?decision, "reconfiguration decision");
        match decision {
            Decision::Skip => return Ok((params.real_main)(cfg, &launch)),
            Decision::Rebuild => rebuild(self.builder, &paths, &params),
            Decision::NoRebuild => {}
        }

        let mut store: Box<dyn TransientStore> = match self.store {
            Some(store) => store,
            None => Box::new(FileStore::in_cache_dir(&paths.cache_directory)),
        };
        if opts.master_binary.is_some() {
            // Relaunched by a master binary: consume what it left behind.
            if let Some(stored) = take_master(store.as_mut()) {
                tracing::debug!(stored = %stored.display(), master = %launch.master_binary.display(), "hand-off store consumed");
            }
        }

        match route(&paths, config_exists) {
            Route::HandOff { custom, error } => {
                let mut args = runtime_args::rewrite(
                    &invocation.args,
                    &opts.program_args,
                    &params.runtime_flags,
                    &params.sentinels,
                );
                if error.is_some() {
                    // The cached binary predates a failed build; don't retry it there.
                    args.insert(0, DENY_RECONF.to_string());
                }
                let master = launch.master_binary.to_string_lossy();
                if let Err(e) = store.set(NAMESPACE, MASTER_BINARY_KEY, &master) {
                    tracing::warn!(error = %e, "cannot record master binary in hand-off store");
                }
                let request = HandOff {
                    custom: &custom,
                    args,
                    master: &launch.master_binary,
                    debug,
                };
                match hand_off(request, store.as_mut(), self.exec, &*params.status_out)? {}
            }
            Route::Main { error } => {
                let cfg = match error {
                    Some(text) => {
                        tracing::debug!("surfacing build error to main program");
                        (params.show_error)(cfg, &text)
                    }
                    None => cfg,
                };
                Ok((params.real_main)(cfg, &launch))
            }
            Route::MainIgnoringCustom => Ok((params.real_main)(cfg, &launch)),
        }
    }
}

fn rebuild<C, R>(builder: &dyn Builder, paths: &PathsConfig, params: &Params<C, R>) {
    (params.status_out)(&format!(
        "Configuration '{}' changed. Rebuilding {}...\n",
        paths.config_file().display(),
        params.app_name
    ));
    match builder.build(paths, &params.build) {
        Ok(()) => tracing::info!(custom = %paths.custom_executable.display(), "custom binary rebuilt"),
        Err(failure) => tracing::warn!("rebuild of {} failed: {} bytes of compiler output", params.app_name, failure.0.len()),
    }
}
