//! Compiler command lines.

use recast_core::builder::BuildRequest;
use recast_core::paths::PathsConfig;
use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};
use std::process::Command;

/// `rustc` invocation for a single configuration source.
///
/// The libs directory is added to the library search path when it exists.
pub fn rustc_command(
    rustc: &Path,
    app_name: &str,
    source: &Path,
    output: &Path,
    paths: &PathsConfig,
    request: &BuildRequest,
) -> Command {
    let mut cmd = Command::new(rustc);
    cmd.args(["--edition", "2021", "--crate-type", "bin", "-C", "opt-level=2"])
        .arg("--crate-name")
        .arg(crate_name(app_name))
        .arg("-o")
        .arg(output);

    let mut search: Vec<&PathBuf> = request.include_dirs.iter().collect();
    if paths.libs_directory.is_dir() {
        search.push(&paths.libs_directory);
    }
    for dir in search {
        cmd.arg("-L").arg(dir);
    }
    for (name, path) in &request.externs {
        if request.hidden.iter().any(|h| h == name) {
            continue;
        }
        cmd.arg("--extern");
        match path {
            Some(path) => cmd.arg(format!("{}={}", name, path.display())),
            None => cmd.arg(name),
        };
    }
    cmd.args(&request.extra_flags).arg(source);
    cmd
}

/// `cargo build` invocation for a configuration project.
///
/// Externs do not apply: dependencies come from the manifest. Include dirs
/// are handed to rustc through `RUSTFLAGS`.
pub fn cargo_command(
    cargo: &Path,
    app_name: &str,
    manifest: &Path,
    target_dir: &Path,
    request: &BuildRequest,
) -> Command {
    let mut cmd = Command::new(cargo);
    cmd.args(["build", "--release", "--message-format", "short"])
        .arg("--manifest-path")
        .arg(manifest)
        .arg("--target-dir")
        .arg(target_dir)
        .args(["--bin", app_name])
        .args(&request.extra_flags);
    if !request.include_dirs.is_empty() {
        let flags: Vec<String> = request
            .include_dirs
            .iter()
            .map(|d| format!("-L{}", d.display()))
            .collect();
        cmd.env("RUSTFLAGS", flags.join(" "));
    }
    cmd
}

/// Where cargo leaves the binary built by [`cargo_command`].
pub fn cargo_artifact(target_dir: &Path, app_name: &str) -> PathBuf {
    target_dir
        .join("release")
        .join(format!("{}{}", app_name, EXE_SUFFIX))
}

fn crate_name(app_name: &str) -> String {
    app_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recast_core::paths::{resolve, PathRequest};
    use std::ffi::OsStr;
    use tempfile::TempDir;

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_rustc_command_layout() {
        let tmp = TempDir::new().unwrap();
        let req = PathRequest {
            app_name: "my-app",
            debug: true,
            ..Default::default()
        };
        let paths = resolve(&req, PathBuf::from("/usr/bin/my-app"), tmp.path());
        std::fs::create_dir_all(&paths.libs_directory).unwrap();
        let request = BuildRequest {
            include_dirs: vec![PathBuf::from("/opt/deps")],
            externs: vec![
                ("my_app".to_string(), Some(PathBuf::from("/opt/deps/libmy_app.rlib"))),
                ("secret".to_string(), Some(PathBuf::from("/opt/deps/libsecret.rlib"))),
                ("recast".to_string(), None),
            ],
            hidden: vec!["secret".to_string()],
            extra_flags: vec!["-g".to_string()],
        };

        let cmd = rustc_command(
            Path::new("rustc"),
            "my-app",
            paths.config_file(),
            Path::new("/cache/out"),
            &paths,
            &request,
        );
        assert_eq!(cmd.get_program(), OsStr::new("rustc"));
        let args = args_of(&cmd);
        assert!(args.windows(2).any(|w| w == ["--crate-name", "my_app"]));
        assert!(args.windows(2).any(|w| w == ["-o", "/cache/out"]));
        assert!(args.windows(2).any(|w| w == ["-L", "/opt/deps"]));
        assert!(args
            .windows(2)
            .any(|w| w[0] == "-L" && Path::new(&w[1]) == paths.libs_directory));
        assert!(args.iter().any(|a| a == "my_app=/opt/deps/libmy_app.rlib"));
        assert!(!args.iter().any(|a| a.starts_with("secret=")));
        assert!(args.windows(2).any(|w| w == ["--extern", "recast"]));
        // Source comes last, after the extra flags.
        assert_eq!(args[args.len() - 2], "-g");
        assert_eq!(Path::new(args.last().unwrap()), paths.config_file());
    }

    #[test]
    fn test_cargo_command_layout() {
        let request = BuildRequest {
            include_dirs: vec![PathBuf::from("/opt/native")],
            extra_flags: vec!["--locked".to_string()],
            ..Default::default()
        };
        let cmd = cargo_command(
            Path::new("cargo"),
            "demo",
            Path::new("/conf/Cargo.toml"),
            Path::new("/cache/target"),
            &request,
        );
        let args = args_of(&cmd);
        assert_eq!(args[0], "build");
        assert!(args.windows(2).any(|w| w == ["--manifest-path", "/conf/Cargo.toml"]));
        assert!(args.windows(2).any(|w| w == ["--target-dir", "/cache/target"]));
        assert!(args.windows(2).any(|w| w == ["--bin", "demo"]));
        assert_eq!(args.last().unwrap(), "--locked");
        let rustflags = cmd
            .get_envs()
            .find(|(k, _)| *k == OsStr::new("RUSTFLAGS"))
            .and_then(|(_, v)| v)
            .unwrap();
        assert_eq!(rustflags, OsStr::new("-L/opt/native"));
    }

    #[test]
    fn test_cargo_artifact_path() {
        assert_eq!(
            cargo_artifact(Path::new("/cache/target"), "demo"),
            PathBuf::from(format!("/cache/target/release/demo{}", EXE_SUFFIX))
        );
    }
}
