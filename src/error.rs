//! Error types for the ranking pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a single input line could not be read as a row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("expected at least 4 fields, field {index} is missing")]
    MissingField { index: usize },

    #[error("field {field} is not an integer: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum PopError {
    #[error("cannot access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: RowError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PopError {
    /// Short name of the pipeline stage the error came from.
    pub fn stage(&self) -> &'static str {
        match self {
            PopError::Io { .. } => "input",
            PopError::Parse { .. } => "aggregate",
            PopError::Config(_) => "config",
        }
    }
}
