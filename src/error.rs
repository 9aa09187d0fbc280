//! Error types for heartcard.
//!
//! The card itself has no failure modes. Everything here comes from the
//! ambient edges: reading config files and driving the terminal.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the CLI.
#[derive(Error, Debug)]
pub enum Error {
    /// Terminal or filesystem I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file could not be read.
    #[error("Cannot read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file was read but is not valid JSON for [`CardConfig`](crate::config::CardConfig).
    #[error("Cannot parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A config value is out of range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Serializing a report or config failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
