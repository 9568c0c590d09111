//! Persistence boundary for todo items.
//!
//! Handlers only see `SharedStore`; which backend sits behind it is decided
//! once at startup. Every method is a single round trip with no caching.

pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{NewTodo, Todo, TodoPatch};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Document-store operations backing the todo resource.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// All todos in the backend's natural order.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// Persist `input` under a newly assigned id and return the stored record.
    async fn insert(&self, input: NewTodo) -> Result<Todo, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Todo>, StoreError>;

    /// Apply `patch` to the record with `id`. Returns the record after the
    /// update, or `None` if no record has that id.
    async fn update(&self, id: Uuid, patch: TodoPatch) -> Result<Option<Todo>, StoreError>;

    /// Remove the record with `id`, returning it if it existed.
    async fn delete(&self, id: Uuid) -> Result<Option<Todo>, StoreError>;
}

/// Store handle injected into the router as state.
pub type SharedStore = Arc<dyn TodoStore>;
