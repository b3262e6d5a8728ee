// src/exec/command.rs

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::{Child, Command};
use tracing::{debug, error, info, warn};

use crate::errors::Result;
use crate::exec::ExecutorBackend;

/// Runs the command through `sh -c` (`cmd /C` on Windows) with the
/// terminal's stdio, keeping at most one instance alive.
#[derive(Debug)]
pub struct ShellExecutor {
    cmd: String,
    child: Option<Child>,
}

impl ShellExecutor {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            child: None,
        }
    }

    /// Whether an instance has been spawned and not yet reaped.
    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    fn spawn(&mut self) -> Result<()> {
        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.cmd);
            c
        };

        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        info!(cmd = %self.cmd, "executing command");
        let child = cmd
            .spawn()
            .with_context(|| format!("spawning command '{}'", self.cmd))?;
        self.child = Some(child);
        Ok(())
    }

    async fn kill_current(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                debug!(%status, "previous command already exited");
            }
            _ => {
                if let Err(err) = child.kill().await {
                    warn!(error = %err, "failed to kill previous command");
                } else {
                    debug!("killed previous command");
                }
            }
        }
    }
}

impl ExecutorBackend for ShellExecutor {
    fn restart(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.kill_current().await;
            self.spawn()
        })
    }

    fn stop(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(self.kill_current())
    }

    fn reap(&mut self) {
        let Some(child) = self.child.as_mut() else {
            return;
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                if status.success() {
                    debug!(%status, "command finished");
                } else {
                    error!(%status, cmd = %self.cmd, "command encountered error");
                }
                self.child = None;
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "failed to poll command status"),
        }
    }
}
