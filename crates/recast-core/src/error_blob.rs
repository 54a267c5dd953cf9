//! The persisted error blob: compiler output of the last failed build.

use crate::paths::PathsConfig;
use std::fs;
use std::io;

/// Error text of the last failed build, if any. Blank files count as absent.
pub fn read(paths: &PathsConfig) -> Option<String> {
    fs::read_to_string(paths.error_file())
        .ok()
        .filter(|s| !s.trim().is_empty())
}

pub fn write(paths: &PathsConfig, text: &str) -> io::Result<()> {
    fs::create_dir_all(&paths.cache_directory)?;
    fs::write(paths.error_file(), text)
}

pub fn clear(paths: &PathsConfig) -> io::Result<()> {
    match fs::remove_file(paths.error_file()) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::{resolve, PathRequest};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_blob_lifecycle() {
        let tmp = TempDir::new().unwrap();
        let req = PathRequest {
            app_name: "demo",
            debug: true,
            ..Default::default()
        };
        let paths = resolve(&req, PathBuf::from("/usr/bin/demo"), tmp.path());
        assert_eq!(read(&paths), None);
        clear(&paths).unwrap();

        write(&paths, "error[E0425]: cannot find value `x`").unwrap();
        assert_eq!(read(&paths).as_deref(), Some("error[E0425]: cannot find value `x`"));

        write(&paths, "\n  \n").unwrap();
        assert_eq!(read(&paths), None);

        clear(&paths).unwrap();
        assert!(!paths.error_file().exists());
    }
}
