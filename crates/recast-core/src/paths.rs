//! Path resolution: the five filesystem locations the engine works with.
//!
//! Everything is derived from the application name, optional overrides and
//! the debug flag. Paths are recomputed on every start and never cached.

use std::env::consts::{ARCH, OS};
use std::path::{Path, PathBuf};

/// Extension of user configuration sources.
pub const SOURCE_EXTENSION: &str = "rs";

/// Subdirectory of the config directory holding auxiliary modules.
pub const LIBS_DIR_NAME: &str = "lib";

/// Compiler output captured from the last failed build.
pub const ERROR_FILE_NAME: &str = "errors.log";

/// How the user supplies their configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigMethod {
    /// A single `<app>.rs` source file.
    SourceFile(PathBuf),
    /// A build script (e.g. `Cargo.toml`) describing a whole project.
    BuildScript(PathBuf),
}

impl ConfigMethod {
    pub fn path(&self) -> &Path {
        match self {
            Self::SourceFile(p) | Self::BuildScript(p) => p,
        }
    }

    pub fn is_build_script(&self) -> bool {
        matches!(self, Self::BuildScript(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    pub running_executable: PathBuf,
    pub custom_executable: PathBuf,
    pub config_method: ConfigMethod,
    pub libs_directory: PathBuf,
    pub cache_directory: PathBuf,
}

impl PathsConfig {
    pub fn config_file(&self) -> &Path {
        self.config_method.path()
    }

    pub fn error_file(&self) -> PathBuf {
        self.cache_directory.join(ERROR_FILE_NAME)
    }
}

/// Inputs to path resolution.
#[derive(Debug, Clone, Default)]
pub struct PathRequest<'a> {
    pub app_name: &'a str,
    pub config_dir: Option<&'a Path>,
    pub cache_dir: Option<&'a Path>,
    /// File name that switches the config method to `BuildScript` when it
    /// exists in the config directory.
    pub build_script: Option<&'a str>,
    pub debug: bool,
}

/// Resolve paths for an explicit running executable and working directory.
pub fn resolve(req: &PathRequest<'_>, running_executable: PathBuf, cwd: &Path) -> PathsConfig {
    let (config_dir, cache_dir) = if req.debug {
        (cwd.to_path_buf(), cwd.join("cache"))
    } else {
        let config_dir = req
            .config_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_config_dir(req.app_name, cwd));
        let cache_dir = req
            .cache_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_cache_dir(req.app_name, cwd));
        (config_dir, cache_dir)
    };

    let config_method = match req.build_script.map(|name| config_dir.join(name)) {
        Some(script) if script.is_file() => ConfigMethod::BuildScript(script),
        _ => ConfigMethod::SourceFile(
            config_dir.join(format!("{}.{}", req.app_name, SOURCE_EXTENSION)),
        ),
    };

    let custom_executable =
        cache_dir.join(custom_binary_name(req.app_name, &running_executable));

    PathsConfig {
        running_executable,
        custom_executable,
        config_method,
        libs_directory: config_dir.join(LIBS_DIR_NAME),
        cache_directory: cache_dir,
    }
}

/// Resolve paths for the current process.
pub fn resolve_current(req: &PathRequest<'_>) -> crate::Result<PathsConfig> {
    let exe = std::env::current_exe().map_err(crate::Error::CurrentExe)?;
    let cwd = std::env::current_dir()
        .map_err(|e| crate::Error::io("cannot read working directory", e))?;
    Ok(resolve(req, exe, &cwd))
}

/// `<app>-<os>-<arch>.tmp[.<ext>]`: unique per target, never a compiler's final output name.
fn custom_binary_name(app_name: &str, running_executable: &Path) -> String {
    let ext = running_executable
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{app_name}-{OS}-{ARCH}.tmp{ext}")
}

fn default_config_dir(app_name: &str, cwd: &Path) -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| cwd.join(".config"))
        .join(app_name)
}

fn default_cache_dir(app_name: &str, cwd: &Path) -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| cwd.join(".cache"))
        .join(app_name)
}
