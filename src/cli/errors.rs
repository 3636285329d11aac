//! CLI-specific error types
//!
//! All CLI errors are fatal: the process reports them and exits non-zero.

use std::io;

use thiserror::Error;

use crate::index::IndexError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Data file unreadable or not a JSON array
    #[error("Data error: {0}")]
    Data(String),

    /// I/O error (data file, stdout)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Index error (config, search method, audit)
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl CliError {
    /// Data error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Data(_) => "POSINDEX_CLI_DATA_ERROR",
            Self::Io(_) => "POSINDEX_CLI_IO_ERROR",
            Self::Json(_) => "POSINDEX_CLI_JSON_ERROR",
            Self::Index(e) => e.code(),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
