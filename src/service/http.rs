//! HTTP transport - maps requests on `/todo` to method dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `ANY /todo` - resolve the caller from `Authorization: Bearer <sso token>`,
//!   then dispatch on the HTTP method. Query string and JSON body are passed
//!   to the handler.
//! - `GET /me` - the resolved caller plus optional profile enrichment.
//! - `GET /health` - `{ "ok": true, "methods": [...] }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use teams_todo::{handlers, service, ClaimsIdentityResolver, InMemoryTodoStore};
//!
//! let app = Arc::new(service::TodoApp::new(
//!     handlers::todo_service(InMemoryTodoStore::new()),
//!     ClaimsIdentityResolver::new(),
//! ));
//!
//! // Get the router to compose with other axum routes
//! let router = service::router(app.clone());
//!
//! // Or serve directly
//! service::serve(app, "0.0.0.0:3978", std::future::pending()).await?;
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use super::error::HandlerError;
use super::service::{Service, TodoRequest, TodoResponse};
use crate::identity::{bearer_token, Identity, IdentityError, IdentityResolver};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Everything a request needs: the dispatching service and the identity resolver.
pub struct TodoApp<S> {
    service: Service<S>,
    resolver: Arc<dyn IdentityResolver>,
}

impl<S: Send + Sync + 'static> TodoApp<S> {
    pub fn new(service: Service<S>, resolver: impl IdentityResolver + 'static) -> Self {
        Self {
            service,
            resolver: Arc::new(resolver),
        }
    }

    pub fn service(&self) -> &Service<S> {
        &self.service
    }

    /// Resolve the caller from the `Authorization` header.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, IdentityError> {
        let token = token_from_headers(headers)?;
        self.resolver.resolve(token).await
    }
}

/// Build an axum `Router` serving the todo endpoint.
pub fn router<S: Send + Sync + 'static>(app: Arc<TodoApp<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler::<S>))
        .route("/me", get(me_handler::<S>))
        .route("/todo", any(todo_handler::<S>))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

/// Serve the app over HTTP at the given address (e.g. `"0.0.0.0:3978"`) until
/// `shutdown` completes.
pub async fn serve<S, F>(app: Arc<TodoApp<S>>, addr: &str, shutdown: F) -> Result<(), std::io::Error>
where
    S: Send + Sync + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let router = router(app);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "todo endpoint listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

/// `GET /health` - returns `{ "ok": true, "methods": [...] }`.
async fn health_handler<S: Send + Sync + 'static>(
    State(app): State<Arc<TodoApp<S>>>,
) -> impl IntoResponse {
    Json(json!({ "ok": true, "methods": app.service.methods() }))
}

/// `GET /me` - the caller's identity, enriched with profile data when the
/// resolver offers it. Profile failures only drop the enrichment.
async fn me_handler<S: Send + Sync + 'static>(
    State(app): State<Arc<TodoApp<S>>>,
    headers: HeaderMap,
) -> Response {
    let token = match token_from_headers(&headers) {
        Ok(token) => token,
        Err(e) => return unauthorized(e),
    };
    let caller = match app.resolver.resolve(token).await {
        Ok(caller) => caller,
        Err(e) => return unauthorized(e),
    };

    let profile = match app.resolver.profile(token, &caller).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(error = %e, object_id = %caller.object_id, "profile lookup failed");
            None
        }
    };

    Json(json!({
        "objectId": caller.object_id,
        "displayName": caller.display_name,
        "profile": profile,
    }))
    .into_response()
}

/// `ANY /todo` - authenticate, then dispatch on the method.
async fn todo_handler<S: Send + Sync + 'static>(
    State(app): State<Arc<TodoApp<S>>>,
    method: Method,
    headers: HeaderMap,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };

    let caller = match app.authenticate(&headers).await {
        Ok(caller) => caller,
        Err(e) => return unauthorized(e),
    };

    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => return into_http(TodoResponse::from_error(&e)),
    };

    let request = TodoRequest {
        method: method.as_str().to_string(),
        query,
        body,
    };
    let response = app.service.dispatch_request(&request, &caller);

    if response.status >= 500 {
        tracing::error!(method = %request.method, status = response.status, body = %response.body, "todo request failed");
    } else if !response.is_success() {
        tracing::debug!(method = %request.method, status = response.status, body = %response.body, "todo request rejected");
    }

    into_http(response)
}

fn token_from_headers(headers: &HeaderMap) -> Result<&str, IdentityError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or(IdentityError::MissingToken)
}

/// Empty or whitespace-only bodies, and a literal `null`, count as no body.
fn parse_body(bytes: &[u8]) -> Result<Option<Value>, HandlerError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(bytes)?;
    Ok((!value.is_null()).then_some(value))
}

fn unauthorized(err: IdentityError) -> Response {
    tracing::warn!(error = %err, "identity resolution failed");
    into_http(TodoResponse::from_error(&HandlerError::from(err)))
}

/// Extractor rejections (oversized body, unreadable query) keep the envelope.
fn rejected(status: StatusCode, message: String) -> Response {
    tracing::debug!(status = status.as_u16(), error = %message, "todo request rejected by extractor");
    into_http(TodoResponse {
        status: status.as_u16(),
        body: json!({ "error": message }),
    })
}

/// Last-resort failure boundary: a panicking handler still answers 500 with
/// the error envelope.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unexpected failure".to_string());
    tracing::error!(error = %message, "todo handler panicked");
    into_http(TodoResponse {
        status: 500,
        body: json!({ "error": message }),
    })
}

fn into_http(response: TodoResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if response.body.is_null() {
        status.into_response()
    } else {
        (status, Json(response.body)).into_response()
    }
}
