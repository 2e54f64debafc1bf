//! Failure taxonomy for every outbound call the client makes.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected content type: {0}")]
    InvalidContentType(String),

    #[error("malformed response body: {0}")]
    Malformed(String),

    #[error("remote returned HTTP {0}")]
    Http(u16),

    #[error("request cancelled")]
    Cancelled,

    #[error("{0}")]
    Validation(String),
}

impl DirectoryError {
    /// Failures that mean the endpoint answered with something other than the expected JSON.
    pub fn is_bad_response_shape(&self) -> bool {
        matches!(self, DirectoryError::InvalidContentType(_) | DirectoryError::Malformed(_))
    }
}
