// src/watch/mod.rs

//! Poll-based change detection.
//!
//! This module is responsible for:
//! - Resolving `watch` / `ignore` pattern lists into the concrete set of
//!   targets for one scan ([`resolver`]).
//! - Diffing consecutive target sets into added / changed / removed events
//!   ([`diff`]).
//! - Exposing both behind the [`Watcher`] controller used by the runtime loop.
//!
//! It does **not** know about timers or the watched command; pacing and
//! presentation belong to the caller.

pub mod diff;
pub mod path_utils;
pub mod resolver;
pub mod watcher;

pub use diff::DiffEngine;
pub use resolver::{build_ignore_set, resolve, TargetSet};
pub use watcher::Watcher;
