//! Build invoker for recast.
//!
//! Compiles the user's configuration into the cached custom binary:
//! `rustc` for a single `<app>.rs`, `cargo` when the config directory holds a
//! `Cargo.toml`. Output is staged in the cache directory and renamed into place,
//! so a failed or interrupted build never leaves a half-written binary behind.

mod command;
mod publish;
mod toolchain;

pub use command::{cargo_command, cargo_artifact, rustc_command};
pub use publish::publish;
pub use toolchain::{resolve_tool, Toolchain};

use anyhow::{Context, Result};
use recast_core::builder::{BuildFailure, BuildRequest, Builder};
use recast_core::error_blob;
use recast_core::paths::{ConfigMethod, PathsConfig};
use std::fs;
use std::path::Path;
use std::process::Output;

/// Name of the captured compiler output of the latest build.
pub const BUILD_LOG_FILE: &str = "build.log";

/// [`Builder`] backed by the Rust toolchain.
#[derive(Debug, Clone)]
pub struct RustBuilder {
    pub app_name: String,
    pub toolchain: Toolchain,
}

impl RustBuilder {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            toolchain: Toolchain::from_env(),
        }
    }

    fn compile(&self, paths: &PathsConfig, request: &BuildRequest) -> Result<Option<String>> {
        fs::create_dir_all(&paths.cache_directory)
            .with_context(|| format!("create {}", paths.cache_directory.display()))?;
        let staging = tempfile::Builder::new()
            .prefix(".build-")
            .tempdir_in(&paths.cache_directory)
            .context("create staging directory")?;
        let file_name = paths
            .custom_executable
            .file_name()
            .context("custom executable has no file name")?;
        let staged = staging.path().join(file_name);

        let (mut cmd, artifact) = match &paths.config_method {
            ConfigMethod::SourceFile(source) => (
                rustc_command(&self.toolchain.rustc, &self.app_name, source, &staged, paths, request),
                staged.clone(),
            ),
            ConfigMethod::BuildScript(manifest) => {
                let target_dir = paths.cache_directory.join("target");
                (
                    cargo_command(&self.toolchain.cargo, &self.app_name, manifest, &target_dir, request),
                    cargo_artifact(&target_dir, &self.app_name),
                )
            }
        };
        tracing::debug!(?cmd, "invoking compiler");
        let output = cmd
            .output()
            .with_context(|| format!("failed to run {}", cmd.get_program().to_string_lossy()))?;
        let log = combined_output(&output);
        write_build_log(&paths.cache_directory, &log);

        if !output.status.success() {
            let text = if log.trim().is_empty() {
                format!(
                    "{} exited with {}",
                    cmd.get_program().to_string_lossy(),
                    output.status
                )
            } else {
                log
            };
            return Ok(Some(text));
        }

        if artifact != staged {
            fs::copy(&artifact, &staged)
                .with_context(|| format!("copy build output {}", artifact.display()))?;
        }
        publish(&staged, &paths.custom_executable)?;
        Ok(None)
    }
}

impl Builder for RustBuilder {
    fn build(&self, paths: &PathsConfig, request: &BuildRequest) -> Result<(), BuildFailure> {
        let failure = match self.compile(paths, request) {
            Ok(None) => {
                if let Err(e) = error_blob::clear(paths) {
                    tracing::warn!("cannot clear {}: {}", paths.error_file().display(), e);
                }
                return Ok(());
            }
            Ok(Some(compiler_output)) => compiler_output,
            Err(e) => format!("{:#}", e),
        };
        if let Err(e) = error_blob::write(paths, &failure) {
            tracing::warn!("cannot persist build error to {}: {}", paths.error_file().display(), e);
        }
        Err(BuildFailure(failure))
    }
}

fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&stdout);
    }
    text
}

fn write_build_log(cache_dir: &Path, log: &str) {
    let path = cache_dir.join(BUILD_LOG_FILE);
    if let Err(e) = fs::write(&path, log) {
        tracing::debug!("cannot write {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recast_core::paths::{resolve, PathRequest};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn paths_in(dir: &Path) -> PathsConfig {
        let req = PathRequest {
            app_name: "demo",
            build_script: Some("Cargo.toml"),
            debug: true,
            ..Default::default()
        };
        resolve(&req, PathBuf::from("/usr/bin/demo"), dir)
    }

    fn builder_with(rustc: PathBuf) -> RustBuilder {
        RustBuilder {
            app_name: "demo".to_string(),
            toolchain: Toolchain {
                rustc,
                cargo: PathBuf::from("cargo"),
            },
        }
    }

    #[test]
    fn test_missing_compiler_persists_error() {
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(tmp.path());
        fs::write(paths.config_file(), "fn main() {}").unwrap();
        let builder = builder_with(tmp.path().join("no-such-rustc"));

        let failure = builder.build(&paths, &BuildRequest::default()).unwrap_err();
        assert!(failure.0.contains("failed to run"), "{}", failure.0);
        assert_eq!(error_blob::read(&paths), Some(failure.0));
        assert!(!paths.custom_executable.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_compiler_keeps_old_binary() {
        let Ok(false_bin) = which::which("false") else {
            return;
        };
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(tmp.path());
        fs::write(paths.config_file(), "fn main() {").unwrap();
        fs::create_dir_all(&paths.cache_directory).unwrap();
        fs::write(&paths.custom_executable, "previous build").unwrap();

        let failure = builder_with(false_bin)
            .build(&paths, &BuildRequest::default())
            .unwrap_err();
        assert!(failure.0.contains("exited with"), "{}", failure.0);
        assert!(error_blob::read(&paths).is_some());
        assert_eq!(
            fs::read_to_string(&paths.custom_executable).unwrap(),
            "previous build"
        );
        // Staging directories are cleaned up.
        let leftovers: Vec<_> = fs::read_dir(&paths.cache_directory)
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().starts_with(".build-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_combined_output_joins_streams() {
        let output = Output {
            status: Default::default(),
            stdout: b"note: from stdout".to_vec(),
            stderr: b"error: from stderr".to_vec(),
        };
        assert_eq!(
            combined_output(&output),
            "error: from stderr\nnote: from stdout"
        );
    }
}
