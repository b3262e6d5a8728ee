// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod glob;
pub mod logging;
pub mod types;
pub mod watch;

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{load_optional, ConfigFile};
use crate::engine::{Runtime, RuntimeOptions};
use crate::errors::PollwatchError;
use crate::exec::ShellExecutor;
use crate::watch::{TargetSet, Watcher};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and command-line overrides
/// - the watcher
/// - the shell executor and poll runtime
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let raw = load_optional(args.config.as_deref())?.merge(args.overrides());
    let cfg = ConfigFile::try_from(raw)?;
    let watcher = build_watcher(&cfg, &args.root)?;

    if args.dry_run {
        let targets = watcher.targets()?;
        write_dry_run(&mut io::stdout().lock(), &watcher, &targets)?;
        debug!("dry-run complete (no execution)");
        return Ok(());
    }

    let cmd = cfg.cmd().ok_or_else(|| {
        PollwatchError::ConfigError(
            "no command given; pass --cmd or set [command].cmd".to_string(),
        )
    })?;

    let options = RuntimeOptions {
        interval: cfg.interval(),
    };
    let runtime = Runtime::new(watcher, ShellExecutor::new(cmd), options);
    runtime.run().await?;
    Ok(())
}

/// Watcher rooted at `root` with every pattern from `cfg` registered.
pub fn build_watcher(cfg: &ConfigFile, root: &Path) -> errors::Result<Watcher> {
    let mut watcher = Watcher::with_root(root)?;
    for pattern in cfg.watch() {
        watcher.watch(pattern.as_str());
    }
    for pattern in cfg.ignore() {
        watcher.ignore(pattern.as_str());
    }
    Ok(watcher)
}

/// Dry-run output: patterns, then every resolved target and the count.
pub fn write_dry_run(out: &mut impl Write, watcher: &Watcher, targets: &TargetSet) -> io::Result<()> {
    writeln!(out, "pollwatch dry-run")?;
    writeln!(out, "  root: {}", watcher.root().display())?;
    for pattern in watcher.watches() {
        writeln!(out, "  watch: {pattern}")?;
    }
    for pattern in watcher.ignores() {
        writeln!(out, "  ignore: {pattern}")?;
    }
    writeln!(out)?;

    writeln!(out, "targets ({}):", targets.len())?;
    for target in targets.values() {
        if target.is_dir() {
            writeln!(out, "  - {}/", target.path())?;
        } else {
            writeln!(out, "  - {}", target.path())?;
        }
    }
    Ok(())
}
