// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs the user's command through the platform shell and
//! restarts it whenever the watcher reports changes.
//!
//! - [`backend`] provides the `ExecutorBackend` trait the runtime talks to,
//!   which tests can replace with a fake implementation.
//! - [`command`] contains `ShellExecutor`, the production backend built on
//!   `tokio::process::Command`.

pub mod backend;
pub mod command;

pub use backend::ExecutorBackend;
pub use command::ShellExecutor;
