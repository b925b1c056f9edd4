//! Request dispatch for the todo endpoint.
//!
//! Build the service by registering one handler per HTTP method on a
//! `Service`. Each handler receives a `Context<S>` with access to the body,
//! the query string, the resolved caller and the store.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use teams_todo::{handlers, service, ClaimsIdentityResolver, InMemoryTodoStore};
//!
//! let service = handlers::todo_service(InMemoryTodoStore::new());
//!
//! // Direct dispatch
//! let response = service.dispatch_request(&service::TodoRequest::get("chat1"), &caller);
//!
//! // HTTP transport (requires "http" feature)
//! // let app = Arc::new(service::TodoApp::new(service, ClaimsIdentityResolver::new()));
//! // service::serve(app, "0.0.0.0:3978", shutdown).await?;
//! ```
//!
//! ## Handler Convention
//!
//! Each handler file follows this convention:
//!
//! ```ignore
//! // src/handlers/list_todos.rs
//!
//! pub const METHOD: &str = "GET";
//!
//! pub fn guard<S>(ctx: &Context<S>) -> bool {
//!     ctx.query("channelOrChatId").is_some()
//! }
//!
//! pub fn handle<S: TodoStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
//!     // ...
//! }
//! ```

mod context;
mod error;
mod service;

pub use context::Context;
pub use error::HandlerError;
pub use service::{Service, TodoRequest, TodoResponse};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve, TodoApp, MAX_BODY_BYTES};

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `METHOD: &str` - the HTTP method it serves
/// - `guard(ctx) -> bool` - cheap input presence check
/// - `handle(ctx) -> Result<Value, HandlerError>` - the handler
///
/// # Example
/// ```ignore
/// let service = teams_todo::register_handlers!(
///     service::Service::new(InMemoryTodoStore::new()),
///     handlers::list_todos,
///     handlers::create_todo,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .method_guarded(
                $($seg)::+::METHOD,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
