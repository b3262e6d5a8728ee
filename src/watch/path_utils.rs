// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::{Component, Path, PathBuf};

/// Lexically normalise a path: drop `.` components and resolve `..` against
/// the preceding component. Symlinks are not consulted.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve `path` against `base` (if relative) and normalise the result.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Returns `None` if the path does not live under `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    if rel.as_os_str().is_empty() {
        return Some(".".to_string());
    }
    Some(rel.to_string_lossy().replace('\\', "/"))
}

/// Path shown to users: relative to `root` when possible, absolute otherwise.
pub fn display_path(root: &Path, path: &Path) -> String {
    relative_str(root, path).unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_dots() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("../a/..")), PathBuf::from(".."));
    }

    #[test]
    fn absolutize_joins_relative_paths() {
        let base = Path::new("/work");
        assert_eq!(absolutize(base, Path::new("src/../lib")), PathBuf::from("/work/lib"));
        assert_eq!(absolutize(base, Path::new("/etc")), PathBuf::from("/etc"));
        assert_eq!(absolutize(base, Path::new(".")), PathBuf::from("/work"));
    }

    #[test]
    fn display_paths() {
        let root = Path::new("/work");
        assert_eq!(display_path(root, Path::new("/work/src/main.go")), "src/main.go");
        assert_eq!(display_path(root, Path::new("/work")), ".");
        assert_eq!(display_path(root, Path::new("/other/x")), "/other/x");
    }
}
