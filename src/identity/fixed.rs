use std::collections::HashMap;

use async_trait::async_trait;

use super::{Identity, IdentityError, IdentityResolver, UserProfile};

/// Resolver backed by a fixed token table.
///
/// ```ignore
/// let resolver = StaticIdentityResolver::new()
///     .with_token("token-u1", Identity::new("U1", "Ada"))
///     .with_token("token-u2", Identity::new("U2", "Grace"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityResolver {
    tokens: HashMap<String, Identity>,
}

impl StaticIdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token. Builder pattern, returns `self` for chaining.
    pub fn with_token(mut self, token: impl Into<String>, identity: Identity) -> Self {
        self.tokens.insert(token.into(), identity);
        self
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<Identity, IdentityError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| IdentityError::Rejected("unknown token".into()))
    }

    async fn profile(
        &self,
        _token: &str,
        identity: &Identity,
    ) -> Result<Option<UserProfile>, IdentityError> {
        Ok(Some(UserProfile {
            object_id: identity.object_id.clone(),
            display_name: identity.display_name.clone(),
            ..UserProfile::default()
        }))
    }
}
