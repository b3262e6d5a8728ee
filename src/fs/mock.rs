// src/fs/mock.rs

use super::{FileMeta, FileSystem};
use std::collections::{HashMap, HashSet, VecDeque};
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime};

/// Maximum number of symlinks followed while resolving one path.
const MAX_LINK_HOPS: usize = 40;

#[derive(Debug, Clone)]
pub enum MockKind {
    File,
    Dir(Vec<String>), // List of child names
    Symlink(PathBuf),
}

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub kind: MockKind,
    pub modified: SystemTime,
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    denied: HashSet<PathBuf>,
    /// Directories whose entries cannot be stat'd (readable, not searchable).
    unsearchable: HashSet<PathBuf>,
    /// Seconds since the epoch handed out as the next modification time.
    clock: u64,
}

/// In-memory filesystem rooted at `/`.
///
/// Every mutation advances a logical clock by one second and stamps the
/// touched entry (and its parent directory) with it, so modification times
/// are strictly increasing and deterministic.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("not found: {:?}", path))
}

fn names_of(path: &Path) -> VecDeque<OsString> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_os_string()),
            Component::ParentDir => Some(OsString::from("..")),
            _ => None,
        })
        .collect()
}

impl MockState {
    fn tick(&mut self) -> SystemTime {
        self.clock += 1;
        SystemTime::UNIX_EPOCH + Duration::from_secs(self.clock)
    }

    fn link_child(&mut self, parent: &Path, name: &str, now: SystemTime) {
        self.ensure_dir(parent, now);
        if let Some(entry) = self.entries.get_mut(parent) {
            if let MockKind::Dir(children) = &mut entry.kind {
                if !children.iter().any(|c| c == name) {
                    children.push(name.to_string());
                }
            }
            entry.modified = now;
        }
    }

    fn ensure_dir(&mut self, path: &Path, now: SystemTime) {
        if self.entries.contains_key(path) {
            return;
        }
        self.entries.insert(
            path.to_path_buf(),
            MockEntry {
                kind: MockKind::Dir(Vec::new()),
                modified: now,
            },
        );
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            let name = name.to_string_lossy().into_owned();
            self.link_child(parent, &name, now);
        }
    }

    fn insert(&mut self, path: &Path, kind: MockKind) {
        let now = self.tick();
        self.entries.insert(
            path.to_path_buf(),
            MockEntry {
                kind,
                modified: now,
            },
        );
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            let name = name.to_string_lossy().into_owned();
            self.link_child(parent, &name, now);
        }
    }

    /// Resolve `path` to the key of the entry it designates, following
    /// symlinks in intermediate components and, if `follow_last`, the final
    /// one as well.
    fn resolve(&self, path: &Path, follow_last: bool) -> io::Result<PathBuf> {
        let mut queue = names_of(path);
        let mut resolved = PathBuf::from("/");
        let mut hops = 0;

        while let Some(name) = queue.pop_front() {
            if name == ".." {
                resolved.pop();
                continue;
            }
            let candidate = resolved.join(&name);
            let entry = self.entries.get(&candidate).ok_or_else(|| not_found(path))?;
            let is_last = queue.is_empty();
            match &entry.kind {
                MockKind::Symlink(target) if !is_last || follow_last => {
                    hops += 1;
                    if hops > MAX_LINK_HOPS {
                        return Err(io::Error::other(format!(
                            "too many levels of symbolic links: {:?}",
                            path
                        )));
                    }
                    let target = if target.is_absolute() {
                        target.clone()
                    } else {
                        resolved.join(target)
                    };
                    let mut rest = names_of(&target);
                    rest.extend(queue.drain(..));
                    queue = rest;
                    resolved = PathBuf::from("/");
                }
                _ => resolved = candidate,
            }
        }
        Ok(resolved)
    }

    fn meta(&self, path: &Path, follow_last: bool) -> io::Result<FileMeta> {
        if path.ancestors().skip(1).any(|dir| self.unsearchable.contains(dir)) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {:?}", path),
            ));
        }
        let key = self.resolve(path, follow_last)?;
        let entry = self.entries.get(&key).ok_or_else(|| not_found(path))?;
        Ok(FileMeta {
            modified: Some(entry.modified),
            is_dir: matches!(entry.kind, MockKind::Dir(_)),
            is_symlink: matches!(entry.kind, MockKind::Symlink(_)),
        })
    }
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mock = Self::default();
        {
            let mut state = mock.state();
            let now = state.tick();
            state.ensure_dir(Path::new("/"), now);
        }
        mock
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create (or re-create) a regular file, creating parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        self.state().insert(path.as_ref(), MockKind::File);
    }

    /// Create a directory and any missing parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut state = self.state();
        let now = state.tick();
        state.ensure_dir(path.as_ref(), now);
    }

    /// Create a symlink at `path` pointing to `target` (absolute, or relative
    /// to the link's parent directory).
    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl Into<PathBuf>) {
        self.state()
            .insert(path.as_ref(), MockKind::Symlink(target.into()));
    }

    /// Bump the modification time of an existing entry.
    pub fn touch(&self, path: impl AsRef<Path>) {
        let mut state = self.state();
        let now = state.tick();
        if let Some(entry) = state.entries.get_mut(path.as_ref()) {
            entry.modified = now;
        }
    }

    /// Remove an entry and everything below it.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.state();
        let now = state.tick();
        state.entries.retain(|p, _| !p.starts_with(path));
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            if let Some(entry) = state.entries.get_mut(parent) {
                if let MockKind::Dir(children) = &mut entry.kind {
                    children.retain(|c| c.as_str() != name.to_string_lossy());
                }
                entry.modified = now;
            }
        }
    }

    /// Make `read_dir` on this directory fail with `PermissionDenied`.
    pub fn deny_read(&self, path: impl AsRef<Path>) {
        self.state().denied.insert(path.as_ref().to_path_buf());
    }

    /// Undo [`deny_read`](Self::deny_read).
    pub fn allow_read(&self, path: impl AsRef<Path>) {
        self.state().denied.remove(path.as_ref());
    }

    /// Make stat calls on anything below this directory fail with
    /// `PermissionDenied`, while listing it still works.
    pub fn deny_search(&self, path: impl AsRef<Path>) {
        self.state().unsearchable.insert(path.as_ref().to_path_buf());
    }

    /// Undo [`deny_search`](Self::deny_search).
    pub fn allow_search(&self, path: impl AsRef<Path>) {
        self.state().unsearchable.remove(path.as_ref());
    }
}

impl FileSystem for MockFileSystem {
    fn symlink_metadata(&self, path: &Path) -> io::Result<FileMeta> {
        self.state().meta(path, false)
    }

    fn metadata(&self, path: &Path) -> io::Result<FileMeta> {
        self.state().meta(path, true)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self.state();
        let key = state.resolve(path, true)?;
        if state.denied.contains(&key) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {:?}", path),
            ));
        }
        match state.entries.get(&key).map(|e| &e.kind) {
            Some(MockKind::Dir(children)) => {
                let mut paths: Vec<PathBuf> = children.iter().map(|name| path.join(name)).collect();
                paths.sort();
                Ok(paths)
            }
            Some(_) => Err(io::Error::other(format!("not a directory: {:?}", path))),
            None => Err(not_found(path)),
        }
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(PathBuf::from("/"))
    }
}
