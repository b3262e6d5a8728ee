// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Overrides;

/// Command-line arguments for `pollwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pollwatch",
    version,
    about = "Rerun a command whenever watched files change, by polling.",
    long_about = None
)]
pub struct CliArgs {
    /// Files, directories or globs to watch (comma separated, repeatable).
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',')]
    pub watch: Vec<String>,

    /// Files, directories or globs to ignore (comma separated, repeatable).
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Command to run, through the platform shell.
    #[arg(long, value_name = "CMD")]
    pub cmd: Option<String>,

    /// Poll interval in milliseconds (default 400).
    #[arg(long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Path to a TOML config file.
    ///
    /// Default: `Pollwatch.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory that relative patterns are resolved against.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `POLLWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the watched targets, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliArgs {
    /// The values that take part in config merging.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            watch: clean_patterns(&self.watch),
            ignore: clean_patterns(&self.ignore),
            cmd: self.cmd.clone(),
            interval_ms: self.interval,
        }
    }
}

/// Trim every entry and drop the empty ones.
fn clean_patterns(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
