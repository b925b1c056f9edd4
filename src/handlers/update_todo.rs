//! `PUT /todo` - change the description or the completion flag of one item.
//!
//! Exactly one column is written per call. A truthy `description` wins;
//! otherwise `isCompleted` is written as 1 when truthy, 0 when not.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::service::{Context, HandlerError};
use crate::store::{TodoRepository, TodoStore};
use crate::todo::{is_truthy, TodoId};

pub const METHOD: &str = "PUT";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoInput {
    pub id: TodoId,
    #[serde(default)]
    pub description: Value,
    /// `Some(Value::Null)` for an explicit `null`; `None` only when the key is absent.
    #[serde(default, deserialize_with = "present")]
    pub is_completed: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("id")
}

pub fn handle<S: TodoStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<UpdateTodoInput>()?;
    let store = ctx.store();

    let existed = if is_truthy(&input.description) {
        let description = input
            .description
            .as_str()
            .ok_or_else(|| HandlerError::Invalid("description must be a string".into()))?;
        if input.is_completed.is_some() {
            tracing::debug!(id = %input.id, "both description and isCompleted sent; only description is written");
        }
        store.update_description(&input.id, description)?
    } else {
        let completed = input
            .is_completed
            .as_ref()
            .ok_or_else(|| HandlerError::Invalid("description or isCompleted required".into()))?;
        store.update_completion(&input.id, is_truthy(completed))?
    };

    if !existed {
        tracing::debug!(id = %input.id, "update targeted unknown todo");
    }
    Ok(Value::Null)
}
