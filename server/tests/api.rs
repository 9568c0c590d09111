use std::sync::Arc;

use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use todo_server::{app, MemoryStore, Status, Todo, TodoStore};
use tower::ServiceExt;

const NIL_ID: &str = "00000000-0000-0000-0000-000000000000";

fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (app(store.clone()), store)
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn assert_server_error(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = body_json(response).await;
    assert_eq!(body, serde_json::json!({ "error": "Server Error" }));
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let (app, _) = test_app();
    let resp = app.oneshot(empty_request("GET", "/todo-list")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn list_returns_records_in_insertion_order() {
    let (app, store) = test_app();
    for name in ["one", "two", "three"] {
        store
            .insert(todo_server::NewTodo {
                name: Some(name.to_string()),
                status: None,
            })
            .await
            .unwrap();
    }

    let resp = app.oneshot(empty_request("GET", "/todo-list")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    let names: Vec<_> = todos.iter().filter_map(|t| t.name.as_deref()).collect();
    assert_eq!(names, ["one", "two", "three"]);
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_200_with_id() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/todo-list",
            r#"{"name":"Test Todo","status":"Backlog"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert!(!todo.id.is_nil());
    assert_eq!(todo.name.as_deref(), Some("Test Todo"));
    assert_eq!(todo.status, Some(Status::Backlog));
}

#[tokio::test]
async fn create_todo_without_status_leaves_it_unset() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(json_request("POST", "/todo-list", r#"{"name":"Loose end"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["name"], "Loose end");
    assert!(body.get("status").is_none());
}

#[tokio::test]
async fn create_todo_unknown_status_is_server_error() {
    let (app, store) = test_app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/todo-list",
            r#"{"name":"Bad","status":"Archived"}"#,
        ))
        .await
        .unwrap();

    assert_server_error(resp).await;
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_todo_unknown_field_is_server_error() {
    let (app, store) = test_app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/todo-list",
            r#"{"name":"Bad","owner":"sam"}"#,
        ))
        .await
        .unwrap();

    assert_server_error(resp).await;
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_todo_malformed_json_is_server_error() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(json_request("POST", "/todo-list", "{not json"))
        .await
        .unwrap();

    assert_server_error(resp).await;
}

#[tokio::test]
async fn create_todo_without_content_type_is_server_error() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/todo-list")
                .body(r#"{"name":"x"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_server_error(resp).await;
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found_returns_null() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(json_request(
            "PUT",
            &format!("/todo-list/{NIL_ID}"),
            r#"{"name":"Nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn update_todo_non_uuid_id_returns_null() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(json_request(
            "PUT",
            "/todo-list/64b7f0c2e1d3a9b8c7d6e5f4",
            r#"{"status":"Done"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn update_todo_invalid_status_is_server_error() {
    let (app, store) = test_app();
    let created = store
        .insert(todo_server::NewTodo {
            name: Some("Keep".to_string()),
            status: Some(Status::Backlog),
        })
        .await
        .unwrap();

    let resp = app
        .oneshot(json_request(
            "PUT",
            &format!("/todo-list/{}", created.id),
            r#"{"status":"Blocked"}"#,
        ))
        .await
        .unwrap();

    assert_server_error(resp).await;
    let stored = store.get(created.id).await.unwrap().unwrap();
    assert_eq!(stored.status, Some(Status::Backlog));
}

#[tokio::test]
async fn update_todo_empty_patch_returns_record_unchanged() {
    let (app, store) = test_app();
    let created = store
        .insert(todo_server::NewTodo {
            name: Some("Same".to_string()),
            status: Some(Status::Done),
        })
        .await
        .unwrap();

    let resp = app
        .oneshot(json_request(
            "PUT",
            &format!("/todo-list/{}", created.id),
            "{}",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo, created);
}

#[tokio::test]
async fn update_todo_accepts_full_record_sent_back() {
    let (app, store) = test_app();
    let created = store
        .insert(todo_server::NewTodo {
            name: Some("Test Todo".to_string()),
            status: Some(Status::Backlog),
        })
        .await
        .unwrap();

    let mut edited = created.clone();
    edited.name = Some("Updated".to_string());
    let body = serde_json::to_string(&edited).unwrap();

    let resp = app
        .oneshot(json_request(
            "PUT",
            &format!("/todo-list/{}", created.id),
            &body,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.id, created.id);
    assert_eq!(todo.name.as_deref(), Some("Updated"));
    assert_eq!(todo.status, Some(Status::Backlog));

    let stored = store.get(created.id).await.unwrap().unwrap();
    assert_eq!(stored, todo);
}

#[tokio::test]
async fn update_todo_with_mismatched_body_id_is_server_error() {
    let (app, store) = test_app();
    let created = store
        .insert(todo_server::NewTodo {
            name: Some("Keep".to_string()),
            status: None,
        })
        .await
        .unwrap();

    let resp = app
        .oneshot(json_request(
            "PUT",
            &format!("/todo-list/{}", created.id),
            &format!(r#"{{"id":"{NIL_ID}","name":"Hijack"}}"#),
        ))
        .await
        .unwrap();

    assert_server_error(resp).await;
    let stored = store.get(created.id).await.unwrap().unwrap();
    assert_eq!(stored.name.as_deref(), Some("Keep"));
    assert_eq!(store.list().await.unwrap().len(), 1);
}

// --- delete ---

#[tokio::test]
async fn delete_todo_not_found_still_succeeds() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(empty_request("DELETE", &format!("/todo-list/{NIL_ID}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "deleted": true }));
}

#[tokio::test]
async fn delete_todo_non_uuid_id_succeeds() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(empty_request("DELETE", "/todo-list/not-an-id"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "deleted": true }));
}

// --- routing ---

#[tokio::test]
async fn get_single_todo_is_not_routed() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(empty_request("GET", &format!("/todo-list/{NIL_ID}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let (app, store) = test_app();
    let mut app = app.into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/todo-list",
            r#"{"name":"Test Todo","status":"Backlog"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Todo = body_json(resp).await;
    assert_eq!(created.name.as_deref(), Some("Test Todo"));
    assert_eq!(created.status, Some(Status::Backlog));
    let id = created.id;

    // list — should contain the one todo
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todo-list"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, id);

    // update — partial: only name
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/todo-list/{id}"),
            r#"{"name":"Updated"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.id, id);
    assert_eq!(updated.name.as_deref(), Some("Updated"));
    assert_eq!(updated.status, Some(Status::Backlog)); // unchanged

    // update — partial: only status
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/todo-list/{id}"),
            r#"{"status":"In progress"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.name.as_deref(), Some("Updated")); // unchanged from previous update
    assert_eq!(updated.status, Some(Status::InProgress));

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/todo-list/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "deleted": true }));
    assert!(store.get(id).await.unwrap().is_none());

    // delete again — still succeeds
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/todo-list/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // list after delete — id gone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todo-list"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.iter().all(|t| t.id != id));
}
