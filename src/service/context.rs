//! Context passed to todo handlers.
//!
//! Carries the optional JSON body, query parameters, the resolved caller and
//! a reference to the store. Handlers access everything through the context.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;
use crate::identity::Identity;

/// The context passed to every handler.
///
/// Generic over `S` (the store type) so handlers work with whatever store
/// the service was built with.
pub struct Context<'a, S> {
    /// Upper-cased HTTP method being handled.
    method: String,
    /// Parsed JSON body; `None` when the request had no body.
    body: Option<Value>,
    query: &'a HashMap<String, String>,
    caller: &'a Identity,
    store: &'a S,
}

impl<'a, S> Context<'a, S> {
    pub(crate) fn new(
        method: String,
        body: Option<Value>,
        query: &'a HashMap<String, String>,
        caller: &'a Identity,
        store: &'a S,
    ) -> Self {
        Self {
            method,
            body,
            query,
            caller,
            store,
        }
    }

    /// Deserialize the body into a typed struct. A missing body is `Invalid`.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        let body = self
            .body
            .as_ref()
            .ok_or_else(|| HandlerError::Invalid("request body required".into()))?;
        serde_json::from_value(body.clone()).map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// Raw JSON body, if one was sent.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// A query string parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(|v| v.as_str())
    }

    /// The identity resolved from the caller's token.
    pub fn caller(&self) -> &Identity {
        self.caller
    }

    pub fn store(&self) -> &S {
        self.store
    }

    /// Check if the body contains a field.
    pub fn has_field(&self, field: &str) -> bool {
        self.body
            .as_ref()
            .and_then(|body| body.get(field))
            .is_some()
    }

    /// Check if the body contains all specified fields.
    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
