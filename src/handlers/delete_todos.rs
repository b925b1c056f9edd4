//! `DELETE /todo` - with a body `{ id }` delete that item; without a body
//! delete every item the caller owns.

use serde::Deserialize;
use serde_json::Value;

use crate::service::{Context, HandlerError};
use crate::store::{TodoRepository, TodoStore};
use crate::todo::TodoId;

pub const METHOD: &str = "DELETE";

#[derive(Debug, Deserialize)]
pub struct DeleteTodoInput {
    pub id: TodoId,
}

/// Either shape is acceptable up front; the body is checked in `handle`.
pub fn guard<S>(_ctx: &Context<S>) -> bool {
    true
}

pub fn handle<S: TodoStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let store = ctx.store();

    if ctx.has_body() {
        let input = ctx.input::<DeleteTodoInput>()?;
        if !store.delete_by_id(&input.id)? {
            tracing::debug!(id = %input.id, "delete targeted unknown todo");
        }
    } else {
        let owner = &ctx.caller().object_id;
        let removed = store.delete_by_owner(owner)?;
        tracing::info!(owner = %owner, removed, "deleted caller's todos");
    }

    Ok(Value::Null)
}
