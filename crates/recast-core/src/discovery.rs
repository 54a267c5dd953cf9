//! Source discovery: recursively list configuration sources under a directory.
//!
//! Used by staleness detection and by the build invoker (include paths).

use std::fs;
use std::path::{Path, PathBuf};

/// File extensions counted as configuration sources.
pub const SOURCE_EXTENSIONS: &[&str] = &[crate::paths::SOURCE_EXTENSION];

/// Directory names never descended into (build output).
const SKIP_DIRS: &[&str] = &["target"];

/// List every source file below `root`. Missing root yields an empty list.
///
/// Entries are visited in file-name order so repeated scans agree.
pub fn find_sources(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(root, &mut found);
    found
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    let mut children: Vec<_> = entries.flatten().collect();
    children.sort_by_key(|e| e.file_name());
    for entry in children {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_dir() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') || SKIP_DIRS.contains(&&*name) {
                continue;
            }
            walk(&path, found);
        } else if is_source(&path) {
            found.push(path);
        }
    }
}

fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
}
