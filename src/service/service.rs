//! Service - method handler registry and dispatch.
//!
//! `Service<S>` holds the todo store and one handler per HTTP method.
//! Each handler receives a `Context<S>` and returns `Result<Value, HandlerError>`;
//! `Value::Null` means "no response body".
//!
//! ## Example
//!
//! ```ignore
//! use teams_todo::service::{Service, TodoRequest};
//! use serde_json::json;
//!
//! let service = Service::new(InMemoryTodoStore::new())
//!     .method("GET", |ctx| {
//!         let channel = ctx.query("channelOrChatId").unwrap_or_default();
//!         Ok(serde_json::to_value(ctx.store().find_by_channel(channel)?)?)
//!     });
//!
//! let response = service.dispatch_request(&TodoRequest::get("chat1"), &caller);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::context::Context;
use super::error::HandlerError;
use crate::identity::Identity;

/// A registered method handler with optional guard.
struct MethodHandler<S> {
    guard: Option<Box<dyn Fn(&Context<S>) -> bool + Send + Sync>>,
    handle: Box<dyn Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync>,
}

/// Routes requests to handler functions by HTTP method.
///
/// Method names are matched case-insensitively.
pub struct Service<S> {
    store: S,
    handlers: HashMap<String, MethodHandler<S>>,
}

impl<S: Send + Sync + 'static> Service<S> {
    /// Create a new service around the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for an HTTP method.
    ///
    /// Uses builder pattern, returns `self` for chaining.
    pub fn method<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_ascii_uppercase(),
            MethodHandler {
                guard: None,
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Register a handler with a guard function.
    ///
    /// The guard runs first. If it returns `false`, the request is rejected
    /// with `HandlerError::GuardRejected`.
    pub fn method_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<S>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_ascii_uppercase(),
            MethodHandler {
                guard: Some(Box::new(guard)),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch a request for the given method on behalf of `caller`.
    pub fn dispatch(
        &self,
        method: &str,
        body: Option<Value>,
        query: &HashMap<String, String>,
        caller: &Identity,
    ) -> Result<Value, HandlerError> {
        let method = method.to_ascii_uppercase();
        let handler = self
            .handlers
            .get(&method)
            .ok_or_else(|| HandlerError::MethodNotAllowed(method.clone()))?;

        let ctx = Context::new(method, body, query, caller, &self.store);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                return Err(HandlerError::GuardRejected(ctx.method().to_string()));
            }
        }

        (handler.handle)(&ctx)
    }

    /// Dispatch a `TodoRequest`, folding errors into a `TodoResponse`.
    pub fn dispatch_request(&self, request: &TodoRequest, caller: &Identity) -> TodoResponse {
        match self.dispatch(
            &request.method,
            request.body.clone().filter(|body| !body.is_null()),
            &request.query,
            caller,
        ) {
            Ok(body) => TodoResponse::ok(body),
            Err(e) => TodoResponse::from_error(&e),
        }
    }

    /// Registered method names, sorted.
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        methods.sort_unstable();
        methods
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

// =============================================================================
// Request / Response types
// =============================================================================

/// A transport-neutral inbound request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoRequest {
    /// HTTP method, any case.
    pub method: String,
    #[serde(default)]
    pub query: HashMap<String, String>,
    /// JSON body; `None` or `null` means no body.
    #[serde(default)]
    pub body: Option<Value>,
}

impl TodoRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }

    /// `GET ?channelOrChatId=<id>`
    pub fn get(channel_or_chat_id: impl Into<String>) -> Self {
        Self::new("GET").with_query("channelOrChatId", channel_or_chat_id)
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Result of dispatching a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body; `Value::Null` when there is nothing to send.
    pub body: Value,
}

impl TodoResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// Error envelope: `{ "error": "<message>" }`.
    pub fn from_error(err: &HandlerError) -> Self {
        Self {
            status: err.status_code(),
            body: serde_json::json!({ "error": err.to_string() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
