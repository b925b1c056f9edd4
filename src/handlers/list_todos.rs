//! `GET /todo?channelOrChatId=<id>` - every item in one chat or channel.

use serde_json::Value;

use crate::service::{Context, HandlerError};
use crate::store::{TodoRepository, TodoStore};

pub const METHOD: &str = "GET";

pub const CHANNEL_PARAM: &str = "channelOrChatId";

/// The scoping parameter must be present; an empty value is allowed.
pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.query(CHANNEL_PARAM).is_some()
}

pub fn handle<S: TodoStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let channel = ctx.query(CHANNEL_PARAM).unwrap_or_default();
    let todos = ctx.store().find_by_channel(channel)?;
    tracing::debug!(channel, count = todos.len(), "listed todos");
    Ok(serde_json::to_value(todos)?)
}
