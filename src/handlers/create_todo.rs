//! `POST /todo` - create an item owned by the caller.

use serde::Deserialize;
use serde_json::Value;

use crate::service::{Context, HandlerError};
use crate::store::TodoStore;
use crate::todo::{is_truthy, NewTodo};

pub const METHOD: &str = "POST";

/// Body shape. An `objectId` in the body is ignored; ownership always comes
/// from the resolved caller.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoInput {
    pub description: String,
    #[serde(default)]
    pub is_completed: Value,
    pub channel_or_chat_id: String,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_fields(&["description", "channelOrChatId"])
}

pub fn handle<S: TodoStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<CreateTodoInput>()?;
    if input.description.is_empty() {
        return Err(HandlerError::Invalid("description must not be empty".into()));
    }

    let todo = ctx.store().insert(NewTodo {
        description: input.description,
        object_id: ctx.caller().object_id.clone(),
        is_completed: is_truthy(&input.is_completed),
        channel_or_chat_id: input.channel_or_chat_id,
    })?;

    tracing::info!(id = %todo.id, owner = %todo.object_id, channel = %todo.channel_or_chat_id, "todo created");
    Ok(serde_json::to_value(todo)?)
}
