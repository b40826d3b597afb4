//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint against the
//! in-memory backend.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cacher::{api::create_router, AppState, Cacher, MemoryBackend};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    let state = AppState::new(Cacher::new(MemoryBackend::new()), 300);
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/data/test_key",
        Some(json!({"value": {"nested": [1, 2, 3]}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("test_key"));
    assert_eq!(json["ttl"], 300);
}

#[tokio::test]
async fn test_set_endpoint_with_ttl() {
    let app = create_test_app();

    let body = json!({"value": 1, "ttl": 60});
    let (status, json) = send(&app, "PUT", "/data/ttl_key", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ttl"], 60);
}

#[tokio::test]
async fn test_set_endpoint_missing_value() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/data/k")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"ttl":60}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_set_endpoint_zero_ttl_is_store_error() {
    let app = create_test_app();

    let body = json!({"value": 1, "ttl": 0});
    let (status, json) = send(&app, "PUT", "/data/k", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json.get("error").is_some());

    let (_, json) = send(&app, "GET", "/data/k", None).await;
    assert!(json["value"].is_null());
}

#[tokio::test]
async fn test_oversized_ttl_rejected() {
    let app = create_test_app();
    send(&app, "PUT", "/data/k", Some(json!({"value": 1}))).await;

    let body = json!({"value": 2, "ttl": u64::MAX});
    let (status, _) = send(&app, "PUT", "/data/k", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({"ttl": u64::MAX});
    let (status, _) = send(&app, "POST", "/data/k/ttl", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = send(&app, "GET", "/data/k", None).await;
    assert_eq!(json["value"], 1);
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app();

    let body = json!({"value": {"name": "a"}, "ttl": 15});
    let (status, _) = send(&app, "PUT", "/data/user:1", Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "GET", "/data/user:1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "user:1");
    assert_eq!(json["value"], json!({"name": "a"}));
}

#[tokio::test]
async fn test_get_endpoint_miss_returns_null() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/data/nonexistent_key", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["value"].is_null());
}

#[tokio::test]
async fn test_get_after_ttl_expiry() {
    let app = create_test_app();

    send(&app, "PUT", "/data/short", Some(json!({"value": "x", "ttl": 1}))).await;
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let (_, json) = send(&app, "GET", "/data/short", None).await;
    assert!(json["value"].is_null());
}

// == TTL Endpoint Tests ==

#[tokio::test]
async fn test_ttl_endpoint_returns_value() {
    let app = create_test_app();
    send(&app, "PUT", "/data/k", Some(json!({"value": [true]}))).await;

    let (status, json) = send(&app, "POST", "/data/k/ttl", Some(json!({"ttl": 120}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], json!([true]));
    assert_eq!(json["ttl"], 120);
}

#[tokio::test]
async fn test_ttl_zero_expires_entry() {
    let app = create_test_app();
    send(&app, "PUT", "/data/k", Some(json!({"value": "v"}))).await;

    let (status, _) = send(&app, "POST", "/data/k/ttl", Some(json!({"ttl": 0}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, "GET", "/data/k", None).await;
    assert!(json["value"].is_null());
}

#[tokio::test]
async fn test_ttl_endpoint_not_found() {
    let app = create_test_app();

    let (status, json) = send(&app, "POST", "/data/missing/ttl", Some(json!({"ttl": 10}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("missing"));
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_success() {
    let app = create_test_app();
    send(&app, "PUT", "/data/delete_key", Some(json!({"value": 1}))).await;

    let (status, json) = send(&app, "DELETE", "/data/delete_key", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("delete_key"));

    let (_, json) = send(&app, "GET", "/data/delete_key", None).await;
    assert!(json["value"].is_null());
}

#[tokio::test]
async fn test_delete_endpoint_missing_key_succeeds() {
    let app = create_test_app();

    let (status, _) = send(&app, "DELETE", "/data/never_set", None).await;

    assert_eq!(status, StatusCode::OK);
}

// == Validation Tests ==

#[tokio::test]
async fn test_key_too_long_rejected() {
    let app = create_test_app();
    let uri = format!("/data/{}", "x".repeat(300));

    let (status, json) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

// == Stats & Health Tests ==

#[tokio::test]
async fn test_stats_track_hits_and_misses() {
    let app = create_test_app();
    send(&app, "PUT", "/data/a", Some(json!({"value": 1}))).await;
    send(&app, "GET", "/data/a", None).await;
    send(&app, "GET", "/data/b", None).await;

    let (status, json) = send(&app, "GET", "/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["hit_rate"], 0.5);
    assert_eq!(json["backend"], "memory");
    assert_eq!(json["prefix"], "cacher");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
