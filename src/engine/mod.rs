// src/engine/mod.rs

//! Poll loop driving the watcher.
//!
//! The watcher itself is synchronous and knows nothing about time; the
//! [`runtime`] module paces scans on an interval, runs them on the blocking
//! pool, and restarts the command through an `ExecutorBackend` whenever a
//! scan reports events.

use std::time::Duration;

pub mod runtime;

pub use runtime::Runtime;

/// Runtime options for the async shell.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Delay between the end of one scan and the start of the next.
    pub interval: Duration,
}

/// What a single poll cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Scan succeeded with no events (or only seeded the baseline).
    Idle,
    /// Scan produced this many events and the command was restarted.
    Changed(usize),
    /// Scan failed; the baseline was kept.
    ScanFailed,
}
