// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The runtime talks to an `ExecutorBackend` instead of spawning processes
//! itself, so tests can count restarts without running a shell.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

/// Trait abstracting how the watched command is (re)started.
pub trait ExecutorBackend: Send {
    /// Stop the current instance, if any is still running, and start a new
    /// one.
    fn restart(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Stop the current instance, if any, and wait for it to exit.
    fn stop(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;

    /// Notice an instance that exited on its own. Called once per tick.
    fn reap(&mut self) {}
}
