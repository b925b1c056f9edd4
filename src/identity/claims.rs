//! Claims-based resolver for SSO tokens issued to the Teams tab.
//!
//! The token is a compact JWT (`header.payload.signature`). The resolver
//! decodes the payload and maps:
//!
//! | claim                       | use                       |
//! |-----------------------------|---------------------------|
//! | `oid` (fallback `sub`)      | `Identity::object_id`     |
//! | `name` (fallback `preferred_username`) | `Identity::display_name` |
//! | `upn` / `preferred_username`| `UserProfile::user_principal_name` |
//! | `tid`                       | `UserProfile::tenant_id`  |
//! | `exp`                       | expiry check              |
//! | `aud`                       | audience check, if configured |
//!
//! Signature verification belongs to the token issuer's validation stack and
//! is not performed here.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

use super::{Identity, IdentityError, IdentityResolver, UserProfile};

#[derive(Debug, Default, Deserialize)]
struct Claims {
    oid: Option<String>,
    sub: Option<String>,
    name: Option<String>,
    preferred_username: Option<String>,
    upn: Option<String>,
    tid: Option<String>,
    exp: Option<f64>,
    #[serde(default)]
    aud: Value,
}

impl Claims {
    fn object_id(&self) -> Option<&str> {
        self.oid
            .as_deref()
            .or(self.sub.as_deref())
            .filter(|id| !id.is_empty())
    }

    fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.preferred_username.as_deref())
            .unwrap_or_default()
    }

    fn has_audience(&self, expected: &str) -> bool {
        match &self.aud {
            Value::String(aud) => aud == expected,
            Value::Array(auds) => auds.iter().any(|aud| aud.as_str() == Some(expected)),
            _ => false,
        }
    }
}

/// Resolves identities from the claims carried in the SSO token.
#[derive(Debug, Clone, Default)]
pub struct ClaimsIdentityResolver {
    audience: Option<String>,
    leeway: Duration,
}

impl ClaimsIdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept tokens issued for this audience (app id URI or client id).
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Clock skew tolerated when checking `exp`.
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    fn decode(&self, token: &str) -> Result<Claims, IdentityError> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => return Err(IdentityError::Malformed("expected three segments".into())),
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| IdentityError::Malformed(e.to_string()))
    }

    /// Validate a token against `now` (seconds since the Unix epoch).
    fn validate(&self, token: &str, now: u64) -> Result<Claims, IdentityError> {
        let claims = self.decode(token)?;

        if claims.object_id().is_none() {
            return Err(IdentityError::MissingObjectId);
        }

        if let Some(exp) = claims.exp {
            if exp + self.leeway.as_secs_f64() <= now as f64 {
                return Err(IdentityError::Expired);
            }
        }

        if let Some(expected) = &self.audience {
            if !claims.has_audience(expected) {
                return Err(IdentityError::AudienceMismatch {
                    expected: expected.clone(),
                });
            }
        }

        Ok(claims)
    }

    pub(crate) fn resolve_at(&self, token: &str, now: u64) -> Result<Identity, IdentityError> {
        let claims = self.validate(token, now)?;
        let object_id = claims.object_id().unwrap_or_default();
        Ok(Identity::new(object_id, claims.display_name()))
    }

    pub(crate) fn profile_at(&self, token: &str, now: u64) -> Result<UserProfile, IdentityError> {
        let claims = self.validate(token, now)?;
        Ok(UserProfile {
            object_id: claims.object_id().unwrap_or_default().to_string(),
            display_name: claims.display_name().to_string(),
            user_principal_name: claims.upn.clone().or(claims.preferred_username.clone()),
            tenant_id: claims.tid.clone(),
        })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[async_trait]
impl IdentityResolver for ClaimsIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<Identity, IdentityError> {
        self.resolve_at(token, unix_now())
    }

    async fn profile(
        &self,
        token: &str,
        _identity: &Identity,
    ) -> Result<Option<UserProfile>, IdentityError> {
        self.profile_at(token, unix_now()).map(Some)
    }
}
