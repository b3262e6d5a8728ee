// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PollwatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("unable to read directory {path:?}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to stat {path:?}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to expand glob {pattern}")]
    Expand {
        pattern: String,
        #[source]
        source: Box<PollwatchError>,
    },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PollwatchError {
    /// Attach the offending pattern to a matcher failure.
    pub fn expanding(pattern: impl Into<String>, source: PollwatchError) -> Self {
        PollwatchError::Expand {
            pattern: pattern.into(),
            source: Box::new(source),
        }
    }

    /// The error followed by each of its causes, joined with `: `.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PollwatchError>;
