//! Identity resolution - turns a caller's SSO token into a stable identity.
//!
//! The resolver is an external collaborator: the service only relies on the
//! [`IdentityResolver`] capability. Two implementations ship with the crate:
//!
//! - [`ClaimsIdentityResolver`] reads the identity claims out of the token
//!   payload (object id, display name, expiry, audience).
//! - [`StaticIdentityResolver`] maps fixed tokens to identities for local
//!   development and tests.

mod claims;
mod error;
mod fixed;

pub use claims::ClaimsIdentityResolver;
pub use error::IdentityError;
pub use fixed::StaticIdentityResolver;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A resolved caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable identifier; the ownership key for todo items.
    pub object_id: String,
    pub display_name: String,
}

impl Identity {
    pub fn new(object_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Auxiliary profile data used to enrich responses. Never used for CRUD decisions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub object_id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Resolves SSO tokens to identities.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve a bearer token to the caller's identity.
    async fn resolve(&self, token: &str) -> Result<Identity, IdentityError>;

    /// Optional profile lookup for the resolved caller.
    async fn profile(
        &self,
        _token: &str,
        _identity: &Identity,
    ) -> Result<Option<UserProfile>, IdentityError> {
        Ok(None)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Returns `None` for other schemes
/// or an empty token.
pub fn bearer_token(authorization: &str) -> Option<&str> {
    let (scheme, token) = authorization.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
