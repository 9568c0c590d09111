//! HTTP service for a todo list backed by a document store.
//!
//! # Overview
//! Four routes map straight onto store calls:
//! `GET /todo-list`, `POST /todo-list`, `PUT /todo-list/{id}` and
//! `DELETE /todo-list/{id}`. The service keeps no state of its own between
//! requests; the store handle passed to [`app`] is the only shared value.
//!
//! # Design
//! - `TodoStore` is the seam between handlers and persistence. `MongoStore`
//!   is the production backend; `MemoryStore` serves tests and local runs.
//! - Any failure answers 500 with `{"error":"Server Error"}`.
//! - Updating an unknown id answers 200 with `null`; deleting one still
//!   answers `{"deleted":true}`.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

pub use config::{Config, StoreConfig};
pub use error::{ApiError, ConfigError, StoreError};
pub use model::{Deleted, NewTodo, Status, Todo, TodoPatch};
pub use store::{MemoryStore, MongoStore, SharedStore, TodoStore};

pub fn app(store: SharedStore) -> Router {
    routes::router(store)
}

/// Serve the API on `listener` until the server fails.
pub async fn run(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

/// Construct the store described by `config`.
pub async fn open_store(config: &StoreConfig) -> Result<SharedStore, StoreError> {
    let store: SharedStore = match config {
        StoreConfig::Mongo { uri, database } => {
            Arc::new(MongoStore::connect(uri, database.as_deref()).await?)
        }
        StoreConfig::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}
