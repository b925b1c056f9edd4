//! Todo records and the typed column selectors used by the store.
//!
//! A [`TodoItem`] is owned by the identity that created it (`objectId`) and
//! scoped for listing by the conversation it belongs to (`channelOrChatId`).
//!
//! ## Wire shape
//!
//! ```json
//! {
//!   "id": "9b1d0c4e-6f3a-4d8e-9a77-2f5c0f1e7b21",
//!   "description": "buy milk",
//!   "objectId": "U1",
//!   "isCompleted": 0,
//!   "channelOrChatId": "chat1"
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque, store-issued identifier of a todo item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub description: String,
    pub object_id: String,
    #[serde(with = "completion_flag")]
    pub is_completed: bool,
    pub channel_or_chat_id: String,
}

impl TodoItem {
    /// The value of `field` rendered as the string the store compares against.
    pub fn field_value(&self, field: TodoField) -> &str {
        match field {
            TodoField::Id => self.id.as_str(),
            TodoField::Description => &self.description,
            TodoField::ObjectId => &self.object_id,
            TodoField::IsCompleted => {
                if self.is_completed {
                    "1"
                } else {
                    "0"
                }
            }
            TodoField::ChannelOrChatId => &self.channel_or_chat_id,
        }
    }

    pub(crate) fn apply(&mut self, update: &ColumnUpdate) {
        match update {
            ColumnUpdate::Description(description) => self.description = description.clone(),
            ColumnUpdate::Completion(done) => self.is_completed = *done,
        }
    }
}

/// Input for inserting a new item. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub description: String,
    pub object_id: String,
    pub is_completed: bool,
    pub channel_or_chat_id: String,
}

impl NewTodo {
    pub fn new(
        description: impl Into<String>,
        object_id: impl Into<String>,
        is_completed: bool,
        channel_or_chat_id: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            object_id: object_id.into(),
            is_completed,
            channel_or_chat_id: channel_or_chat_id.into(),
        }
    }

    pub(crate) fn into_item(self, id: TodoId) -> TodoItem {
        TodoItem {
            id,
            description: self.description,
            object_id: self.object_id,
            is_completed: self.is_completed,
            channel_or_chat_id: self.channel_or_chat_id,
        }
    }
}

/// Column selector for `list_by` / `delete_by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoField {
    Id,
    Description,
    ObjectId,
    IsCompleted,
    ChannelOrChatId,
}

impl TodoField {
    /// The wire name of the column.
    pub fn name(&self) -> &'static str {
        match self {
            TodoField::Id => "id",
            TodoField::Description => "description",
            TodoField::ObjectId => "objectId",
            TodoField::IsCompleted => "isCompleted",
            TodoField::ChannelOrChatId => "channelOrChatId",
        }
    }
}

impl fmt::Display for TodoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A write to one mutable column.
///
/// `id` and `objectId` have no variant: once inserted they cannot change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnUpdate {
    Description(String),
    Completion(bool),
}

/// Loose JSON truthiness: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `isCompleted` travels as `0`/`1`; booleans are accepted on input.
mod completion_flag {
    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_any(FlagVisitor)
    }

    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("0, 1 or a boolean")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(Unexpected::Unsigned(other), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(Unexpected::Signed(other), &self)),
            }
        }
    }
}
