//! Error types for todo request handlers.

use thiserror::Error;

use crate::identity::IdentityError;
use crate::store::StoreError;

/// Error type for handler operations.
///
/// Every variant is reported to the caller as `{ "error": "<message>" }`
/// with the status from [`HandlerError::status_code`].
#[derive(Debug, Error)]
pub enum HandlerError {
    /// No handler registered for this HTTP method.
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),
    /// Body was not valid JSON or did not match the expected shape.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Required input missing or unusable.
    #[error("invalid request: {0}")]
    Invalid(String),
    /// Guard rejected the request before the handler ran.
    #[error("guard rejected {0} request: missing required input")]
    GuardRejected(String),
    /// Identity resolution failed.
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] IdentityError),
    /// Store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl HandlerError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::MethodNotAllowed(_) => 405,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::Invalid(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Unauthorized(_) => 401,
            HandlerError::Store(_) => 500,
        }
    }
}
