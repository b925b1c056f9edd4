//! Named todo operations on top of any [`TodoStore`].

use super::{StoreError, TodoStore};
use crate::todo::{ColumnUpdate, TodoField, TodoId, TodoItem};

/// Typed repository API used by the request handlers.
///
/// Blanket-implemented for every [`TodoStore`]. By-id writes report whether
/// the target existed so callers can tell a no-op from a change.
pub trait TodoRepository: TodoStore {
    /// Items scoped to one chat or channel.
    fn find_by_channel(&self, channel_or_chat_id: &str) -> Result<Vec<TodoItem>, StoreError> {
        self.list_by(TodoField::ChannelOrChatId, channel_or_chat_id)
    }

    /// Items owned by one identity, across all conversations.
    fn find_by_owner(&self, object_id: &str) -> Result<Vec<TodoItem>, StoreError> {
        self.list_by(TodoField::ObjectId, object_id)
    }

    /// Replace the description. Returns true if the item existed.
    fn update_description(&self, id: &TodoId, description: &str) -> Result<bool, StoreError> {
        let written = self.set_column(id, ColumnUpdate::Description(description.to_string()))?;
        Ok(written > 0)
    }

    /// Set the completion flag. Returns true if the item existed.
    fn update_completion(&self, id: &TodoId, completed: bool) -> Result<bool, StoreError> {
        let written = self.set_column(id, ColumnUpdate::Completion(completed))?;
        Ok(written > 0)
    }

    /// Delete one item. Returns true if it existed.
    fn delete_by_id(&self, id: &TodoId) -> Result<bool, StoreError> {
        let removed = self.delete_by(TodoField::Id, id.as_str())?;
        Ok(removed > 0)
    }

    /// Delete everything an identity owns. Returns how many items went.
    fn delete_by_owner(&self, object_id: &str) -> Result<usize, StoreError> {
        self.delete_by(TodoField::ObjectId, object_id)
    }
}

impl<T: TodoStore + ?Sized> TodoRepository for T {}
