//! CatalogClient against a local catalog stub.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use recauth_auth::{CatalogClient, RecordLookup};
use serde_json::{Value, json};

/// Catalog stub:
/// - `quarterly` has one result, anything else has none
/// - `explode` answers 503
/// - `garbage` answers a body without `results`
/// - requests without `Bearer secret` get 401
async fn search(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer secret");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"})));
    }

    match q.get("recordName").map(String::as_str) {
        Some("quarterly") => (
            StatusCode::OK,
            Json(json!({"results": [{"name": "quarterly"}]})),
        ),
        Some("explode") => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({}))),
        Some("garbage") => (StatusCode::OK, Json(json!({"items": 3}))),
        _ => (StatusCode::OK, Json(json!({"results": []}))),
    }
}

async fn spawn_catalog() -> SocketAddr {
    let app = Router::new().route("/records", get(search));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, token: Option<&str>) -> CatalogClient {
    CatalogClient::new(
        format!("http://{addr}/"),
        token.map(str::to_string),
        Duration::from_secs(2),
    )
    .unwrap()
}

#[tokio::test]
async fn test_found_and_not_found() {
    let addr = spawn_catalog().await;
    let catalog = client(addr, Some("secret"));

    assert!(catalog.find_record("quarterly").await.unwrap());
    assert!(!catalog.find_record("nonexistent").await.unwrap());
    // Through the trait as well.
    assert!(catalog.record_exists("quarterly").await.unwrap());
}

#[tokio::test]
async fn test_error_status_is_catalog_error() {
    let addr = spawn_catalog().await;
    let catalog = client(addr, Some("secret"));

    let err = catalog.find_record("explode").await.unwrap_err();
    assert_eq!(err.domain(), "catalog");
    assert!(err.is_retryable());
    assert!(err.to_string().contains("503"));

    let unauthorized = client(addr, None).find_record("quarterly").await.unwrap_err();
    assert!(unauthorized.to_string().contains("401"));
}

#[tokio::test]
async fn test_undecodable_body_is_catalog_error() {
    let addr = spawn_catalog().await;
    let err = client(addr, Some("secret"))
        .find_record("garbage")
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 500);
}

#[tokio::test]
async fn test_unreachable_catalog() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr, Some("secret"))
        .find_record("quarterly")
        .await
        .unwrap_err();
    assert_eq!(err.domain(), "catalog");
}
