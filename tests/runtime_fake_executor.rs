use std::sync::Arc;
use std::time::Duration;

use pollwatch::engine::{Runtime, RuntimeOptions, TickOutcome};
use pollwatch::fs::mock::MockFileSystem;
use pollwatch::watch::Watcher;
use pollwatch_test_utils::{init_tracing, with_timeout, ExecCall, FakeExecutor};

fn project() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file("/p/src/main.go");
    fs.add_file("/p/src/vendor/dep.go");
    fs
}

fn runtime(fs: &MockFileSystem, executor: FakeExecutor, interval_ms: u64) -> Runtime<FakeExecutor> {
    let mut watcher = Watcher::with_fs(Arc::new(fs.clone()), "/p").expect("watcher");
    watcher.watch("src/**/*.go");
    watcher.ignore("src/vendor");
    Runtime::new(
        watcher,
        executor,
        RuntimeOptions {
            interval: Duration::from_millis(interval_ms),
        },
    )
}

#[tokio::test]
async fn start_seeds_and_runs_command_once() {
    init_tracing();
    let fs = project();
    let executor = FakeExecutor::new();
    let mut rt = runtime(&fs, executor.clone(), 10);

    rt.start().await;
    assert_eq!(executor.calls(), vec![ExecCall::Restart]);
    assert_eq!(rt.tracked(), 1);

    assert_eq!(rt.tick().await, TickOutcome::Idle);
    assert_eq!(executor.restarts(), 1);
}

#[tokio::test]
async fn changes_restart_the_command() {
    init_tracing();
    let fs = project();
    let executor = FakeExecutor::new();
    let mut rt = runtime(&fs, executor.clone(), 10);
    rt.start().await;

    fs.add_file("/p/src/util.go");
    fs.touch("/p/src/main.go");
    assert_eq!(rt.tick().await, TickOutcome::Changed(2));
    assert_eq!(executor.restarts(), 2);
    assert_eq!(rt.tracked(), 2);

    // Ignored paths never trigger a restart.
    fs.touch("/p/src/vendor/dep.go");
    assert_eq!(rt.tick().await, TickOutcome::Idle);
    assert_eq!(executor.restarts(), 2);
}

#[tokio::test]
async fn failed_scan_is_survived() {
    init_tracing();
    let fs = project();
    fs.add_file("/p/src/pkg/lib.go");
    let executor = FakeExecutor::new();
    let mut rt = runtime(&fs, executor.clone(), 10);
    rt.start().await;

    fs.deny_read("/p/src/pkg");
    assert_eq!(rt.tick().await, TickOutcome::ScanFailed);
    assert_eq!(executor.restarts(), 1);

    fs.allow_read("/p/src/pkg");
    assert_eq!(rt.tick().await, TickOutcome::Idle);
}

#[tokio::test]
async fn spawn_failures_do_not_stop_polling() {
    init_tracing();
    let fs = project();
    let executor = FakeExecutor::failing();
    let mut rt = runtime(&fs, executor.clone(), 10);
    rt.start().await;

    fs.add_file("/p/src/new.go");
    assert_eq!(rt.tick().await, TickOutcome::Changed(1));
    assert_eq!(executor.restarts(), 2);
}

#[tokio::test]
async fn run_until_polls_and_stops_command_on_shutdown() {
    init_tracing();
    let fs = project();
    let executor = FakeExecutor::new();
    let rt = runtime(&fs, executor.clone(), 10);

    let writer = fs.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        writer.add_file("/p/src/late.go");
    });

    with_timeout(rt.run_until(tokio::time::sleep(Duration::from_millis(400))))
        .await
        .expect("runtime");

    let calls = executor.calls();
    assert_eq!(calls.first(), Some(&ExecCall::Restart));
    assert_eq!(calls.last(), Some(&ExecCall::Stop));
    assert_eq!(executor.restarts(), 2);
}
