//! Todo Store - the authoritative set of todo items.
//!
//! [`TodoStore`] is the four-operation contract every backend provides:
//! scan by column, write one column by id, insert, delete by column.
//! [`TodoRepository`] layers the named operations the request handlers use
//! on top of it, so handlers never pick a column by hand.
//!
//! ## Example
//!
//! ```ignore
//! use teams_todo::{InMemoryTodoStore, NewTodo, TodoRepository};
//!
//! let store = InMemoryTodoStore::new();
//! let todo = store.insert(NewTodo::new("buy milk", "U1", false, "chat1"))?;
//! store.update_completion(&todo.id, true)?;
//! let in_chat = store.find_by_channel("chat1")?;
//! ```

mod error;
mod in_memory;
mod repository;

pub use error::StoreError;
pub use in_memory::InMemoryTodoStore;
pub use repository::TodoRepository;

use crate::todo::{ColumnUpdate, NewTodo, TodoField, TodoId, TodoItem};

/// Storage contract for todo items.
pub trait TodoStore: Send + Sync {
    /// Every item whose `field` equals `value`, in insertion order.
    ///
    /// An empty `value` only matches items whose column is literally empty.
    fn list_by(&self, field: TodoField, value: &str) -> Result<Vec<TodoItem>, StoreError>;

    /// Overwrite one column on the item with the given id.
    ///
    /// Returns the number of items written; 0 when the id is unknown.
    fn set_column(&self, id: &TodoId, update: ColumnUpdate) -> Result<usize, StoreError>;

    /// Append a new item under a freshly generated id and return it.
    fn insert(&self, todo: NewTodo) -> Result<TodoItem, StoreError>;

    /// Remove every item whose `field` equals `value`. Returns how many went.
    fn delete_by(&self, field: TodoField, value: &str) -> Result<usize, StoreError>;
}
