// src/glob/expand.rs

//! Filesystem expansion of one brace-free pattern.

use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::segment::Segment;
use super::{is_ignored, IgnoreSet, Matches};
use crate::errors::{PollwatchError, Result};
use crate::fs::{FileMeta, FileSystem};

#[derive(Debug)]
enum Part {
    Literal(String),
    /// `**` as a whole segment.
    Globstar,
    Wild(Segment),
}

/// Split a pattern into compiled parts. `None` if any segment is malformed.
fn compile(pattern: &str) -> Option<Vec<Part>> {
    let mut parts: Vec<Part> = Vec::new();
    for raw in pattern.split('/') {
        if raw.is_empty() || raw == "." {
            continue;
        }
        if raw == "**" {
            if !matches!(parts.last(), Some(Part::Globstar)) {
                parts.push(Part::Globstar);
            }
            continue;
        }
        let segment = Segment::parse(raw)?;
        parts.push(match segment.literal() {
            Some(name) => Part::Literal(name),
            None => Part::Wild(segment),
        });
    }
    Some(parts)
}

/// Walks the filesystem for one pattern at a time, accumulating matches.
///
/// Pending work is kept on an explicit stack of `(path, part index)` pairs so
/// deep trees do not grow the call stack.
pub(super) struct Expander<'a> {
    fs: &'a dyn FileSystem,
    ignores: &'a IgnoreSet,
    traverse: bool,
    matches: Matches,
}

impl<'a> Expander<'a> {
    pub(super) fn new(fs: &'a dyn FileSystem, ignores: &'a IgnoreSet, traverse: bool) -> Self {
        Self {
            fs,
            ignores,
            traverse,
            matches: Matches::new(),
        }
    }

    pub(super) fn into_matches(self) -> Matches {
        self.matches
    }

    /// Expand `pattern` (already free of braces) relative to `root`.
    pub(super) fn expand(&mut self, root: &Path, pattern: &str) -> Result<()> {
        let Some(parts) = compile(pattern) else {
            trace!(pattern, "malformed pattern contributes no matches");
            return Ok(());
        };
        let base = if pattern.starts_with('/') {
            PathBuf::from("/")
        } else {
            root.to_path_buf()
        };

        let mut stack = vec![(base, 0usize)];
        while let Some((path, idx)) = stack.pop() {
            if is_ignored(&path, self.ignores) {
                trace!(?path, "pruned ignored path");
                continue;
            }
            let Some(meta) = self.stat(&path)? else {
                continue;
            };
            if idx == parts.len() {
                self.record(path, meta)?;
                continue;
            }

            match &parts[idx] {
                Part::Literal(name) => {
                    if !meta.is_dir {
                        continue;
                    }
                    let next = if name == ".." {
                        path.parent().map(Path::to_path_buf).unwrap_or(path)
                    } else {
                        path.join(name)
                    };
                    stack.push((next, idx + 1));
                }
                Part::Globstar => {
                    if !meta.is_dir {
                        continue;
                    }
                    let last = idx + 1 == parts.len();
                    if !last {
                        // Zero segments.
                        stack.push((path.clone(), idx + 1));
                    }
                    for child in self.list(&path)? {
                        if last {
                            stack.push((child.clone(), idx + 1));
                            if self.traverse {
                                // Traversal of the match covers the subtree.
                                continue;
                            }
                        }
                        stack.push((child, idx));
                    }
                }
                Part::Wild(segment) => {
                    if !meta.is_dir {
                        continue;
                    }
                    for child in self.list(&path)? {
                        let is_match = child
                            .file_name()
                            .is_some_and(|name| segment.is_match(&name.to_string_lossy()));
                        if is_match {
                            stack.push((child, idx + 1));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Record a match and, when traversing, every entry below it.
    fn record(&mut self, path: PathBuf, meta: FileMeta) -> Result<()> {
        let descend = self.traverse && meta.is_dir;
        self.matches.insert(path.clone(), meta);
        if !descend {
            return Ok(());
        }

        let mut pending = vec![path];
        while let Some(dir) = pending.pop() {
            for child in self.list(&dir)? {
                if self.ignores.contains(&child) {
                    continue;
                }
                let Some(meta) = self.stat(&child)? else {
                    continue;
                };
                if meta.is_dir {
                    pending.push(child.clone());
                }
                self.matches.insert(child, meta);
            }
        }
        Ok(())
    }

    /// Stat an entry. Symlinks report their resolved metadata when the link
    /// resolves and their own otherwise. `None` means the entry does not
    /// exist; any other failure aborts the expansion.
    fn stat(&self, path: &Path) -> Result<Option<FileMeta>> {
        let link = match self.fs.symlink_metadata(path) {
            Ok(link) => link,
            Err(err) if is_absent(&err) => return Ok(None),
            Err(source) => {
                return Err(PollwatchError::Stat {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        if !link.is_symlink {
            return Ok(Some(link));
        }
        // A link that cannot be followed is matched as a broken link.
        match self.fs.metadata(path) {
            Ok(resolved) => Ok(Some(FileMeta {
                is_symlink: true,
                ..resolved
            })),
            Err(_) => Ok(Some(link)),
        }
    }

    /// List a directory. A directory that vanished since it was stat'd lists
    /// as empty; any other failure aborts the expansion.
    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        match self.fs.read_dir(dir) {
            Ok(children) => Ok(children),
            Err(err) if is_absent(&err) => Ok(Vec::new()),
            Err(source) => Err(PollwatchError::ReadDir {
                path: dir.to_path_buf(),
                source,
            }),
        }
    }
}

/// Errors meaning "nothing is there": the entry vanished, or a path
/// component stopped being a directory.
fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
