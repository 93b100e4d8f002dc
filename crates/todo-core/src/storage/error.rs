//! Store error handling
//!
//! Typed errors for store operations. `Validation` and `NotFound` are part of
//! the protocol contract; the remaining variants are infrastructure failures.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Rejected input (empty text on create)
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record with the given id
    #[error("todo not found: {0}")]
    NotFound(String),

    /// Failed to prepare the database location
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing the database location
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    /// Create an error from an I/O error on a directory we tried to create
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied {
                path,
                source: error,
            },
            _ => StoreError::CreateDirectory {
                path,
                source: error,
            },
        }
    }

    /// Whether this error is the caller's fault rather than the store's
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::Validation(_) | StoreError::NotFound(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
