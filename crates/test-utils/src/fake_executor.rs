use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use pollwatch::errors::{PollwatchError, Result};
use pollwatch::exec::ExecutorBackend;

/// One call observed by [`FakeExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecCall {
    Restart,
    Stop,
}

/// A fake executor that records restarts and stops instead of spawning
/// processes. Clones share the same call log.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    calls: Arc<Mutex<Vec<ExecCall>>>,
    fail_restarts: bool,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every restart is recorded and then reported as a spawn failure.
    pub fn failing() -> Self {
        Self {
            fail_restarts: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ExecCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn restarts(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == ExecCall::Restart)
            .count()
    }

    fn record(&self, call: ExecCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ExecutorBackend for FakeExecutor {
    fn restart(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.record(ExecCall::Restart);
            if self.fail_restarts {
                return Err(PollwatchError::Other(anyhow!("spawn refused by fake")));
            }
            Ok(())
        })
    }

    fn stop(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            self.record(ExecCall::Stop);
        })
    }
}
