use thiserror::Error;

/// Why an SSO token could not be turned into an [`Identity`](super::Identity).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token carries no object id")]
    MissingObjectId,
    #[error("token expired")]
    Expired,
    #[error("token audience does not match {expected}")]
    AudienceMismatch { expected: String },
    /// Token is well-formed but not accepted by the resolver.
    #[error("token rejected: {0}")]
    Rejected(String),
}
