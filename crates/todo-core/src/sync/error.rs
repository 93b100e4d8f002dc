//! Errors seen by the sync client
//!
//! Every transport maps its failures onto the same three protocol-level
//! kinds (validation, not found, transport) so `SyncClient` never needs to
//! know what is underneath it.

use thiserror::Error;

use crate::storage::StoreError;

/// Errors returned by a `TodoApi`
#[derive(Error, Debug)]
pub enum ApiError {
    /// The service rejected the input
    #[error("validation failed: {0}")]
    Validation(String),

    /// The id is unknown to the service
    #[error("todo not found: {0}")]
    NotFound(String),

    /// The service answered with an unexpected status
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The request could not complete (connect, timeout, decode)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// An in-process store failed for a reason other than the above
    #[error("store failure: {0}")]
    Store(String),

    /// The configured service URL cannot be used
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the error means the id does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// Whether the error is a transport-level failure
    ///
    /// Non-success statuses other than 400/404 count as transport failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Transport(_) | ApiError::Status { .. } | ApiError::Store(_)
        )
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => ApiError::Validation(msg),
            StoreError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Store(other.to_string()),
        }
    }
}

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;
