//! Todo resource types as they appear on the wire.
//!
//! Request bodies are parsed into `NewTodo` / `TodoPatch`, both of which
//! reject unknown fields and any `status` outside the three known labels.
//! Optional fields are omitted from responses when unset.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow label attached to a todo. Transitions are unrestricted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Backlog,
    #[serde(rename = "In progress")]
    InProgress,
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl Todo {
    /// Attach a freshly generated id to `input`.
    pub fn from_new(input: NewTodo) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            status: input.status,
        }
    }

    /// Overwrite the fields present in `patch`, leaving the rest alone.
    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(status) = patch.status {
            self.status = Some(status);
        }
    }
}

/// Body of `POST /todo-list`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewTodo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
}

/// Body of `PUT /todo-list/{id}`. Serializes to exactly the fields that are
/// set, which is what the Mongo store feeds into `$set`.
///
/// Clients may send a whole `Todo` back; its `id` is accepted but never
/// written.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TodoPatch {
    #[serde(default, skip_serializing)]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none()
    }
}

/// Confirmation returned by `DELETE /todo-list/{id}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: bool,
}
