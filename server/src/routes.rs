use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, put},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::{Deleted, NewTodo, Todo, TodoPatch};
use crate::store::SharedStore;

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/todo-list", get(list_todos).post(create_todo))
        .route("/todo-list/{id}", put(update_todo).delete(delete_todo))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Ids that are not UUIDs were never issued by a store, so they match nothing.
fn parse_id(raw: &str) -> Option<Uuid> {
    let id = Uuid::parse_str(raw).ok();
    if id.is_none() {
        debug!(todo_id = raw, "Path id is not a UUID; treating as absent");
    }
    id
}

async fn list_todos(State(store): State<SharedStore>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = store.list().await?;
    debug!(count = todos.len(), "Listed todos");
    Ok(Json(todos))
}

async fn create_todo(
    State(store): State<SharedStore>,
    payload: Result<Json<NewTodo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(input) = payload?;
    let todo = store.insert(input).await?;
    info!(todo_id = %todo.id, "Created todo");
    Ok(Json(todo))
}

/// Answers `null` when the id matches nothing.
async fn update_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    payload: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Json<Option<Todo>>, ApiError> {
    let Json(patch) = payload?;
    let Some(id) = parse_id(&id) else {
        return Ok(Json(None));
    };
    if let Some(body_id) = patch.id {
        if body_id != id {
            return Err(ApiError::InvalidBody(format!(
                "body id {body_id} does not match path id {id}"
            )));
        }
    }

    let updated = store.update(id, patch).await?;
    match &updated {
        Some(_) => info!(todo_id = %id, "Updated todo"),
        None => debug!(todo_id = %id, "Update matched no todo"),
    }
    Ok(Json(updated))
}

async fn delete_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    if let Some(id) = parse_id(&id) {
        if store.delete(id).await?.is_some() {
            info!(todo_id = %id, "Deleted todo");
        }
    }
    Ok(Json(Deleted { deleted: true }))
}
