// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{PollwatchError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PollwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.watch, raw.command))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_targets(cfg)?;
    validate_interval(cfg)?;
    validate_command(cfg)?;
    Ok(())
}

fn ensure_has_targets(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.paths.iter().all(|p| p.trim().is_empty()) {
        return Err(PollwatchError::ConfigError(
            "there must be at least one file / directory to watch".to_string(),
        ));
    }
    Ok(())
}

fn validate_interval(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.interval_ms == 0 {
        return Err(PollwatchError::ConfigError(
            "[watch].interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_command(cfg: &RawConfigFile) -> Result<()> {
    if let Some(cmd) = &cfg.command.cmd {
        if cmd.trim().is_empty() {
            return Err(PollwatchError::ConfigError(
                "[command].cmd must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}
