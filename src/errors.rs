//! Error types for extraction, per-file processing and configuration.
//!
//! Only [`ConfigError`] is fatal. Everything else is logged at the
//! boundary where it happens and the run moves on.

use crate::extract::machine::Phase;
use std::path::PathBuf;
use thiserror::Error;

/// Why an in-progress article was dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("malformed date {raw:?}: {reason}")]
    Parse { raw: String, reason: String },

    #[error("document ended while waiting for the {phase} of a {publication} article")]
    MarkerNotFound { publication: String, phase: Phase },
}

/// Failures that skip a whole input file or report.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write summary {path}: {source}")]
    Summary {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Startup failures; these abort the run before any file is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read key file {path}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
