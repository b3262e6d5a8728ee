// src/glob/mod.rs

//! Glob expansion against the filesystem.
//!
//! Pattern syntax, evaluated segment by segment over `/`-separated paths:
//!
//! - `?` matches one character, `*` any run of characters within a segment.
//! - `**` as a whole segment matches zero or more segments; inside a
//!   segment it is an ordinary `*`.
//! - `[a-z]`, `[^a-z]` character classes, with `\` escaping `]` and `-`.
//! - `{a,b,c}` alternation; the results of each alternative are unioned.
//! - `\` escapes the next character.
//!
//! Malformed patterns are not errors: they simply match nothing.
//!
//! With `traverse` set, every matched directory also yields its whole
//! subtree. Paths in the ignore set (and everything below them) are never
//! yielded and never descended into.
//!
//! Symlinked directories are followed. There is no cycle detection: a
//! symlink loop below a watched directory makes traversal run forever.

mod braces;
mod expand;
mod segment;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use braces::expand_braces;

use crate::errors::Result;
use crate::fs::{FileMeta, FileSystem};
use expand::Expander;

/// Absolute paths excluded from expansion, subtrees included.
pub type IgnoreSet = HashSet<PathBuf>;

/// Matched absolute path -> metadata.
pub type Matches = BTreeMap<PathBuf, FileMeta>;

/// Expand `pattern` into every matching path.
///
/// Relative patterns are resolved against `root`, which should be an
/// absolute, normalised path; the keys of the result are then absolute too.
/// Errors only when a directory that exists cannot be listed.
pub fn glob(
    fs: &dyn FileSystem,
    root: &Path,
    pattern: &str,
    ignores: &IgnoreSet,
    traverse: bool,
) -> Result<Matches> {
    let Some(alternatives) = expand_braces(pattern) else {
        debug!(pattern, "unbalanced braces; pattern matches nothing");
        return Ok(Matches::new());
    };

    let mut expander = Expander::new(fs, ignores, traverse);
    for alternative in &alternatives {
        expander.expand(root, alternative)?;
    }

    let matches = expander.into_matches();
    debug!(pattern, traverse, matched = matches.len(), "expanded glob");
    Ok(matches)
}

/// Returns true if `path` or any of its ancestors is in `ignores`.
pub fn is_ignored(path: &Path, ignores: &IgnoreSet) -> bool {
    !ignores.is_empty() && path.ancestors().any(|p| ignores.contains(p))
}
