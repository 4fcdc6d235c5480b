//! Errors surfaced by the replay binary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use weave_core::ConfigError;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read the {device} feed: {source}")]
    Feed {
        device: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("Bad event on line {line} of the {device} feed: {source}")]
    Parse {
        device: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Feed names device {0}, which the configuration does not declare")]
    UnknownDevice(String),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;
