// src/fs/mod.rs

//! Filesystem access used by the glob matcher and the target resolver.
//!
//! Everything the watcher learns about the disk goes through [`FileSystem`],
//! so scans can be exercised against [`mock::MockFileSystem`] with explicit
//! modification times and injected failures.

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub mod mock;

/// The subset of file metadata the watcher cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    /// Last modification time, if the platform reports one.
    pub modified: Option<SystemTime>,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl From<fs::Metadata> for FileMeta {
    fn from(meta: fs::Metadata) -> Self {
        Self {
            modified: meta.modified().ok(),
            is_dir: meta.is_dir(),
            is_symlink: meta.file_type().is_symlink(),
        }
    }
}

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    /// Metadata of `path` itself; a trailing symlink is not followed.
    fn symlink_metadata(&self, path: &Path) -> io::Result<FileMeta>;

    /// Metadata of `path` with symlinks resolved.
    fn metadata(&self, path: &Path) -> io::Result<FileMeta>;

    /// Return the entries of a directory as full paths (`path` joined with
    /// each entry name), sorted by name.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Directory that relative patterns are resolved against by default.
    fn current_dir(&self) -> io::Result<PathBuf>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn symlink_metadata(&self, path: &Path) -> io::Result<FileMeta> {
        fs::symlink_metadata(path).map(FileMeta::from)
    }

    fn metadata(&self, path: &Path) -> io::Result<FileMeta> {
        fs::metadata(path).map(FileMeta::from)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            entries.push(entry?.path());
        }
        entries.sort();
        Ok(entries)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}
