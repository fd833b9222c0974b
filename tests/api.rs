//! Integration tests for the memories HTTP API.
//!
//! Drives the axum router directly with `tower::ServiceExt::oneshot`,
//! backed by an in-memory database.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use lumina::api::{create_router, AppState};
use lumina::Database;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Test Setup Helpers
// ============================================================================

fn test_app() -> Router {
    let db = Database::open_in_memory().unwrap();
    db.init().unwrap();
    create_router(AppState::new(Arc::new(db)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, memory) = send(app, Method::POST, "/memories", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    memory
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn health_reports_ready() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn create_defaults_category_and_assigns_id() {
    let app = test_app();
    let before = chrono::Utc::now();

    let memory = create(&app, json!({ "title": "A", "content": "B" })).await;

    assert!(memory["id"].is_i64());
    assert_eq!(memory["title"], "A");
    assert_eq!(memory["content"], "B");
    assert_eq!(memory["category"], "General");

    let created_at: chrono::DateTime<chrono::Utc> =
        memory["created_at"].as_str().unwrap().parse().unwrap();
    assert!(created_at >= before);
    assert!(created_at <= chrono::Utc::now());
}

#[tokio::test]
async fn create_ignores_client_id_and_timestamp() {
    let app = test_app();

    let memory = create(
        &app,
        json!({
            "id": 500,
            "title": "A",
            "content": "B",
            "category": "Work",
            "created_at": "2001-01-01T00:00:00Z"
        }),
    )
    .await;

    assert_ne!(memory["id"], 500);
    assert_ne!(memory["created_at"], "2001-01-01T00:00:00Z");
    assert_eq!(memory["category"], "Work");
}

#[tokio::test]
async fn create_rejects_missing_title() {
    let app = test_app();
    let (status, _) = send(&app, Method::POST, "/memories", Some(json!({ "content": "B" }))).await;
    assert!(status.is_client_error());

    let (_, list) = send(&app, Method::GET, "/memories", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn list_is_empty_then_holds_every_create() {
    let app = test_app();

    let (status, list) = send(&app, Method::GET, "/memories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    for i in 0..4 {
        create(&app, json!({ "title": format!("t{}", i), "content": "c" })).await;
    }

    let (_, list) = send(&app, Method::GET, "/memories", None).await;
    let items = list.as_array().unwrap();
    assert_eq!(items.len(), 4);

    let ids: std::collections::HashSet<i64> =
        items.iter().map(|m| m["id"].as_i64().unwrap()).collect();
    assert_eq!(ids.len(), 4);

    let titles: Vec<&str> = items.iter().map(|m| m["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["t0", "t1", "t2", "t3"]);
}

#[tokio::test]
async fn get_returns_stored_fields() {
    let app = test_app();
    let memory = create(&app, json!({ "title": "A", "content": "B", "category": "Notes" })).await;
    let id = memory["id"].as_i64().unwrap();

    let (status, loaded) = send(&app, Method::GET, &format!("/memories/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded, memory);
}

#[tokio::test]
async fn get_unknown_id_is_404() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/memories/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Memory not found" }));
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_identity() {
    let app = test_app();
    let memory = create(&app, json!({ "title": "A", "content": "B", "category": "Work" })).await;
    let id = memory["id"].as_i64().unwrap();
    let uri = format!("/memories/{}", id);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "id": 999,
            "title": "C",
            "content": "D",
            "category": "Ideas",
            "created_at": "2001-01-01T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], memory["id"]);
    assert_eq!(updated["created_at"], memory["created_at"]);
    assert_eq!(updated["title"], "C");
    assert_eq!(updated["content"], "D");
    assert_eq!(updated["category"], "Ideas");

    let (_, loaded) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(loaded, updated);
}

#[tokio::test]
async fn update_without_category_resets_to_default() {
    let app = test_app();
    let memory = create(&app, json!({ "title": "A", "content": "B", "category": "Work" })).await;
    let uri = format!("/memories/{}", memory["id"]);

    let (status, updated) =
        send(&app, Method::PUT, &uri, Some(json!({ "title": "A", "content": "B" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["category"], "General");
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/memories/77",
        Some(json!({ "title": "A", "content": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Memory not found");
}

#[tokio::test]
async fn delete_then_everything_is_404() {
    let app = test_app();
    let memory = create(&app, json!({ "title": "A", "content": "B" })).await;
    let id = memory["id"].as_i64().unwrap();
    let uri = format!("/memories/{}", id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": format!("Memory {} deleted successfully", id) })
    );

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "title": "A", "content": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Memory not found");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/memories")
                .header("origin", "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
