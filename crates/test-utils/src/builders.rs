use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

/// Builder for on-disk fixture trees inside a fresh temporary directory.
///
/// ```ignore
/// let tree = TreeBuilder::new()
///     .file("src/main.go")
///     .dir("src/empty")
///     .build();
/// ```
pub struct TreeBuilder {
    dir: TempDir,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create an empty file, creating parent directories.
    pub fn file(self, rel: &str) -> Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        File::create(&path).expect("failed to create file");
        self
    }

    /// Create a directory and any missing parents.
    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.dir.path().join(rel)).expect("failed to create dir");
        self
    }

    /// Create a symlink at `rel` pointing to `target` (taken verbatim, so a
    /// relative target is relative to the link's directory).
    #[cfg(unix)]
    pub fn symlink(self, rel: &str, target: &str) -> Self {
        std::os::unix::fs::symlink(target, self.dir.path().join(rel))
            .expect("failed to create symlink");
        self
    }

    pub fn build(self) -> TempDir {
        self.dir
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Push a file's modification time one second past its current value.
///
/// Filesystem clocks can be coarse, so rewriting a file in quick succession
/// does not reliably change its mtime; this does.
pub fn touch(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    let path = path.as_ref();
    let current = fs::metadata(path)?.modified()?;
    let file = File::options().write(true).open(path)?;
    file.set_modified(current + Duration::from_secs(1))?;
    Ok(path.to_path_buf())
}
