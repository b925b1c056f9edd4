pub mod config;
pub mod handlers;
pub mod identity;
pub mod service;
mod store;
mod todo;

pub use config::{AppConfig, ConfigError};
pub use identity::{
    bearer_token, ClaimsIdentityResolver, Identity, IdentityError, IdentityResolver,
    StaticIdentityResolver, UserProfile,
};
pub use service::{Context, HandlerError, Service, TodoRequest, TodoResponse};
pub use store::{InMemoryTodoStore, StoreError, TodoRepository, TodoStore};
pub use todo::{is_truthy, ColumnUpdate, NewTodo, TodoField, TodoId, TodoItem};

#[cfg(feature = "http")]
pub use service::{router, serve, TodoApp};
