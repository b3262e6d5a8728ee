// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Poll interval used when neither the file nor the command line sets one.
pub const DEFAULT_INTERVAL_MS: u64 = 400;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [watch]
/// paths = ["src/**/*.go"]
/// ignore = ["src/vendor"]
/// interval_ms = 400
///
/// [command]
/// cmd = "go test ./..."
/// ```
///
/// All sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub command: CommandSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Files, directories or globs to watch, relative to the root.
    #[serde(default)]
    pub paths: Vec<String>,

    /// Files, directories or globs excluded from watching.
    #[serde(default)]
    pub ignore: Vec<String>,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            ignore: Vec::new(),
            interval_ms: default_interval_ms(),
        }
    }
}

/// `[command]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSection {
    /// Shell command restarted on every change.
    #[serde(default)]
    pub cmd: Option<String>,
}

/// Values taken from the command line.
///
/// Patterns are appended to the file's lists; `cmd` and `interval_ms`
/// replace the file's values when set.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub watch: Vec<String>,
    pub ignore: Vec<String>,
    pub cmd: Option<String>,
    pub interval_ms: Option<u64>,
}

impl RawConfigFile {
    pub fn merge(mut self, overrides: Overrides) -> Self {
        self.watch.paths.extend(overrides.watch);
        self.watch.ignore.extend(overrides.ignore);
        if let Some(ms) = overrides.interval_ms {
            self.watch.interval_ms = ms;
        }
        if overrides.cmd.is_some() {
            self.command.cmd = overrides.cmd;
        }
        self
    }
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`),
/// so holders can rely on at least one watch pattern and a non-zero interval.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    watch: Vec<String>,
    ignore: Vec<String>,
    interval: Duration,
    cmd: Option<String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(watch: WatchSection, command: CommandSection) -> Self {
        Self {
            watch: watch.paths,
            ignore: watch.ignore,
            interval: Duration::from_millis(watch.interval_ms),
            cmd: command.cmd.map(|c| c.trim().to_string()),
        }
    }

    pub fn watch(&self) -> &[String] {
        &self.watch
    }

    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn cmd(&self) -> Option<&str> {
        self.cmd.as_deref()
    }
}
