//! Handlers for the `/todo` endpoint, one module per HTTP method.
//!
//! | method | module           | store operation                         |
//! |--------|------------------|-----------------------------------------|
//! | GET    | `list_todos`     | `find_by_channel`                       |
//! | PUT    | `update_todo`    | `update_description` / `update_completion` |
//! | POST   | `create_todo`    | `insert`                                |
//! | DELETE | `delete_todos`   | `delete_by_id` / `delete_by_owner`      |

pub mod create_todo;
pub mod delete_todos;
pub mod list_todos;
pub mod update_todo;

use crate::service::Service;
use crate::store::TodoStore;

/// Build the todo service with every method handler registered.
pub fn todo_service<S: TodoStore + 'static>(store: S) -> Service<S> {
    crate::register_handlers!(
        Service::new(store),
        list_todos,
        update_todo,
        create_todo,
        delete_todos,
    )
}
