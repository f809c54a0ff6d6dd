//! Endpoint tests for the cast registry service.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use marquee::api::{CastState, cast_app};
use marquee::storage::MemoryCastStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    cast_app(CastState {
        store: Arc::new(MemoryCastStore::new()),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn test_create_then_get() {
    let app = app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/v1/casts/",
        Some(json!({"name": "Daisy Ridley", "nationality": "British"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created,
        json!({"id": 1, "name": "Daisy Ridley", "nationality": "British"})
    );

    let (status, fetched) = send(&app, "GET", "/api/v1/casts/1/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_without_nationality() {
    let app = app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/v1/casts/",
        Some(json!({"name": "Adam Driver"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["nationality"], Value::Null);
}

#[tokio::test]
async fn test_create_missing_name_is_unprocessable() {
    let app = app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/casts/",
        Some(json!({"nationality": "British"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_returns_all() {
    let app = app();
    for name in ["Daisy Ridley", "Adam Driver", "Oscar Isaac"] {
        let (status, _) =
            send(&app, "POST", "/api/v1/casts/", Some(json!({"name": name}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, listed) = send(&app, "GET", "/api/v1/casts/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_rejects_query_parameters() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/v1/casts/?x=1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "This endpoint does not support query parameters."
    );
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/v1/casts/99/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Cast with given id 99 not found");
}

#[tokio::test]
async fn test_get_non_integer_id_is_unprocessable() {
    let app = app();

    let (status, _) = send(&app, "GET", "/api/v1/casts/abc/", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_partial_update_merges_sent_fields_only() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/v1/casts/",
        Some(json!({"name": "Daisy Ridley", "nationality": "British"})),
    )
    .await;

    let (status, updated) = send(
        &app,
        "PUT",
        "/api/v1/casts/1/",
        Some(json!({"name": "Daisy Jazz Isobel Ridley"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({"id": 1, "name": "Daisy Jazz Isobel Ridley", "nationality": "British"})
    );

    // The merged entity was persisted, not just echoed.
    let (_, fetched) = send(&app, "GET", "/api/v1/casts/1/", None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_with_explicit_null_clears_field() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/v1/casts/",
        Some(json!({"name": "Daisy Ridley", "nationality": "British"})),
    )
    .await;

    let (status, updated) = send(
        &app,
        "PUT",
        "/api/v1/casts/1/",
        Some(json!({"nationality": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["nationality"], Value::Null);
    assert_eq!(updated["name"], "Daisy Ridley");
}

#[tokio::test]
async fn test_update_with_empty_patch_changes_nothing() {
    let app = app();
    let (_, created) = send(
        &app,
        "POST",
        "/api/v1/casts/",
        Some(json!({"name": "Daisy Ridley", "nationality": "British"})),
    )
    .await;

    let (status, updated) = send(&app, "PUT", "/api/v1/casts/1/", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, created);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let app = app();

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/casts/5/",
        Some(json!({"name": "Nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Cast with given id 5 not found");
}

#[tokio::test]
async fn test_update_cannot_reassign_id() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/v1/casts/",
        Some(json!({"name": "Daisy Ridley"})),
    )
    .await;

    // A stray id in the payload is ignored; the path id wins.
    let (status, updated) = send(
        &app,
        "PUT",
        "/api/v1/casts/1/",
        Some(json!({"id": 42, "name": "Still Daisy"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 1);
}

#[tokio::test]
async fn test_no_delete_route_on_casts() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/v1/casts/",
        Some(json!({"name": "Daisy Ridley"})),
    )
    .await;

    let (status, _) = send(&app, "DELETE", "/api/v1/casts/1/", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
