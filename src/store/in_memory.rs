//! InMemoryTodoStore - Vec-backed store for development and tests.

use std::sync::{Arc, RwLock};

use super::{StoreError, TodoStore};
use crate::todo::{ColumnUpdate, NewTodo, TodoField, TodoId, TodoItem};

/// In-memory todo store.
///
/// Items for every chat and channel live in one insertion-ordered list;
/// scoping happens when reading. Clone-friendly via Arc, so one instance
/// can be shared between the service and test code.
#[derive(Clone, Default)]
pub struct InMemoryTodoStore {
    items: Arc<RwLock<Vec<TodoItem>>>,
}

impl InMemoryTodoStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items across all conversations.
    pub fn len(&self) -> Result<usize, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| StoreError::LockPoisoned("len"))?;
        Ok(items.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl TodoStore for InMemoryTodoStore {
    fn list_by(&self, field: TodoField, value: &str) -> Result<Vec<TodoItem>, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| StoreError::LockPoisoned("list"))?;

        Ok(items
            .iter()
            .filter(|item| item.field_value(field) == value)
            .cloned()
            .collect())
    }

    fn set_column(&self, id: &TodoId, update: ColumnUpdate) -> Result<usize, StoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StoreError::LockPoisoned("set column"))?;

        let mut written = 0;
        for item in items.iter_mut().filter(|item| &item.id == id) {
            item.apply(&update);
            written += 1;
        }
        Ok(written)
    }

    fn insert(&self, todo: NewTodo) -> Result<TodoItem, StoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StoreError::LockPoisoned("insert"))?;

        let mut id = TodoId::generate();
        while items.iter().any(|item| item.id == id) {
            id = TodoId::generate();
        }

        let item = todo.into_item(id);
        items.push(item.clone());
        Ok(item)
    }

    fn delete_by(&self, field: TodoField, value: &str) -> Result<usize, StoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StoreError::LockPoisoned("delete"))?;

        let before = items.len();
        items.retain(|item| item.field_value(field) != value);
        Ok(before - items.len())
    }
}
