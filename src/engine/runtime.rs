// src/engine/runtime.rs

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::anyhow;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::errors::{PollwatchError, Result};
use crate::exec::ExecutorBackend;
use crate::types::Event;
use crate::watch::Watcher;

use super::{RuntimeOptions, TickOutcome};

/// Drives a [`Watcher`] on a timer and restarts the command through an
/// `ExecutorBackend` whenever something changed.
///
/// Scans run on tokio's blocking pool. The watcher sits behind a mutex, so
/// two scans can never overlap even if a tick is slow.
pub struct Runtime<E: ExecutorBackend> {
    watcher: Arc<Mutex<Watcher>>,
    executor: E,
    options: RuntimeOptions,
    tracked: usize,
}

impl<E: ExecutorBackend> fmt::Debug for Runtime<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("options", &self.options)
            .field("tracked", &self.tracked)
            .finish_non_exhaustive()
    }
}

impl<E: ExecutorBackend> Runtime<E> {
    pub fn new(watcher: Watcher, executor: E, options: RuntimeOptions) -> Self {
        Self {
            watcher: Arc::new(Mutex::new(watcher)),
            executor,
            options,
            tracked: 0,
        }
    }

    /// Number of targets seen by the last successful scan.
    pub fn tracked(&self) -> usize {
        self.tracked
    }

    /// Run until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        self.run_until(ctrl_c()).await
    }

    /// Main loop: start the command, then poll until `shutdown` resolves.
    /// The command is stopped before returning.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.start().await;

        let mut ticker = tokio::time::interval(self.options.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the baseline is already seeded.
        ticker.tick().await;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }

        self.executor.stop().await;
        info!("runtime exiting");
        Ok(())
    }

    /// Log the configuration, seed the baseline and start the command once.
    pub async fn start(&mut self) {
        {
            let watcher = self.watcher.lock().unwrap_or_else(PoisonError::into_inner);
            for pattern in watcher.watches() {
                info!(pattern = %pattern, "watching");
            }
            for pattern in watcher.ignores() {
                info!(pattern = %pattern, "ignoring");
            }
        }

        match self.scan().await {
            Ok(_) => info!("watching {} targets", self.tracked),
            Err(err) => warn!(error = %err.chain(), "initial scan failed"),
        }

        self.restart().await;
    }

    /// One poll cycle.
    pub async fn tick(&mut self) -> TickOutcome {
        self.executor.reap();

        let previous = self.tracked;
        let events = match self.scan().await {
            Ok(events) => events,
            Err(err) => {
                warn!(error = %err.chain(), "scan failed; keeping previous state");
                return TickOutcome::ScanFailed;
            }
        };

        if events.is_empty() {
            return TickOutcome::Idle;
        }

        for event in &events {
            info!(kind = %event.kind, path = event.path(), is_dir = event.is_dir(), "change");
        }
        let delta = self.tracked as i64 - previous as i64;
        info!(
            events = events.len(),
            targets = self.tracked,
            delta,
            "changes detected; restarting command"
        );

        self.restart().await;
        TickOutcome::Changed(events.len())
    }

    async fn scan(&mut self) -> Result<Vec<Event>> {
        let watcher = Arc::clone(&self.watcher);
        let (events, tracked) = tokio::task::spawn_blocking(move || -> Result<(Vec<Event>, usize)> {
            let mut watcher = watcher.lock().unwrap_or_else(PoisonError::into_inner);
            let events = watcher.scan_for_events()?;
            Ok((events, watcher.tracked_count()))
        })
        .await
        .map_err(|e| PollwatchError::Other(anyhow!("scan task failed: {e}")))??;

        debug!(events = events.len(), tracked, "scan finished");
        self.tracked = tracked;
        Ok(events)
    }

    async fn restart(&mut self) {
        if let Err(err) = self.executor.restart().await {
            error!(error = %err.chain(), "failed to run command");
        }
    }
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
