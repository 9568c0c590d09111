//! MongoDB-backed store.
//!
//! Todos live in the `todos` collection as
//! `{ _id: "<uuid>", name?: string, status?: string }`. The `_id` is kept as
//! a string so the documents read the same in the shell as they do on the
//! wire.
//!
//! Every document in the collection must use that shape. A document keyed by
//! an ObjectId fails to decode, and `list` then fails as a whole. The default
//! database is `todo-list` so a fresh deployment never shares a collection
//! with ObjectId-keyed data.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_document},
    options::{ClientOptions, ReturnDocument},
    Client, Collection,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::TodoStore;
use crate::error::StoreError;
use crate::model::{NewTodo, Status, Todo, TodoPatch};

pub const COLLECTION: &str = "todos";

/// Used when neither the configuration nor the URI names a database.
pub const DEFAULT_DATABASE: &str = "todo-list";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<Status>,
}

impl From<&Todo> for TodoDocument {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            name: todo.name.clone(),
            status: todo.status,
        }
    }
}

impl TodoDocument {
    fn into_todo(self) -> Result<Todo, StoreError> {
        let id = Uuid::parse_str(&self.id).map_err(|e| StoreError::CorruptDocument {
            id: self.id.clone(),
            reason: e.to_string(),
        })?;
        Ok(Todo {
            id,
            name: self.name,
            status: self.status,
        })
    }
}

#[derive(Clone, Debug)]
pub struct MongoStore {
    collection: Collection<TodoDocument>,
}

impl MongoStore {
    /// Build a client for `uri` and bind to the todo collection.
    ///
    /// `database` overrides the database named in the URI. The driver
    /// connects lazily, so an unreachable server shows up on first use.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, StoreError> {
        let options = ClientOptions::parse(uri).await?;
        let database = database_name(database, options.default_database.as_deref());
        let client = Client::with_options(options)?;

        info!(database = %database, collection = COLLECTION, "MongoDB store configured");

        Ok(Self {
            collection: client.database(&database).collection(COLLECTION),
        })
    }
}

/// Explicit override, then the database named in the URI, then the default.
fn database_name(explicit: Option<&str>, from_uri: Option<&str>) -> String {
    explicit
        .or(from_uri)
        .unwrap_or(DEFAULT_DATABASE)
        .to_string()
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let documents: Vec<TodoDocument> =
            self.collection.find(doc! {}).await?.try_collect().await?;
        documents.into_iter().map(TodoDocument::into_todo).collect()
    }

    async fn insert(&self, input: NewTodo) -> Result<Todo, StoreError> {
        let todo = Todo::from_new(input);
        self.collection.insert_one(TodoDocument::from(&todo)).await?;
        Ok(todo)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        self.collection
            .find_one(doc! { "_id": id.to_string() })
            .await?
            .map(TodoDocument::into_todo)
            .transpose()
    }

    async fn update(&self, id: Uuid, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        // `$set` must not be empty.
        if patch.is_empty() {
            return self.get(id).await;
        }

        let set = to_document(&patch)?;
        self.collection
            .find_one_and_update(doc! { "_id": id.to_string() }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .map(TodoDocument::into_todo)
            .transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        self.collection
            .find_one_and_delete(doc! { "_id": id.to_string() })
            .await?
            .map(TodoDocument::into_todo)
            .transpose()
    }
}
