//! Index error types
//!
//! Error codes:
//! - POSINDEX_INVALID_SEARCH_METHOD (FATAL, programming error)
//! - POSINDEX_INCONSISTENT (index disagrees with the base array)
//! - POSINDEX_CONFIG (FATAL, bad configuration)
//! - POSINDEX_FOREIGN_BASE (FATAL, swap-delete on an array the index does not track)
//!
//! Core queries and mutations never fail. An `rm` that finds no entry heals
//! itself with a rebuild; these errors only come out of parsing, auditing,
//! configuration and `swap_delete` handed the wrong array.

use thiserror::Error;

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Index errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("Invalid search method: {0}")]
    InvalidSearchMethod(String),

    #[error("Index inconsistent at position {position}: {reason}")]
    Inconsistent { position: usize, reason: String },

    #[error("Invalid index config: {0}")]
    Config(String),

    #[error("Base array is not the one this index was built over")]
    ForeignBaseArray,
}

impl IndexError {
    /// Create an inconsistency error
    pub fn inconsistent(position: usize, reason: impl Into<String>) -> Self {
        IndexError::Inconsistent {
            position,
            reason: reason.into(),
        }
    }

    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexError::InvalidSearchMethod(_) => "POSINDEX_INVALID_SEARCH_METHOD",
            IndexError::Inconsistent { .. } => "POSINDEX_INCONSISTENT",
            IndexError::Config(_) => "POSINDEX_CONFIG",
            IndexError::ForeignBaseArray => "POSINDEX_FOREIGN_BASE",
        }
    }

    /// Whether the caller can recover without fixing code or config.
    ///
    /// An inconsistency is repaired by `rebuild`.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, IndexError::Inconsistent { .. })
    }
}
