//! Shared helpers for the API integration tests.
//!
//! Tests run against the in-memory record store, so no database is needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use cifan_api::auth::jwt::{generate_access_token, JwtConfig};
use cifan_api::config::ServerConfig;
use cifan_api::router::build_app_router;
use cifan_api::state::AppState;
use cifan_core::types::RawRecord;
use cifan_db::store::{MemoryStore, RecordStore, StoredRecord};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState::new(store as Arc<dyn RecordStore>, config.clone());
    build_app_router(state, &config)
}

/// A valid access token for `user_id`.
pub fn token_for(user_id: &str) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

pub fn doc(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

/// Insert a stored document directly, bypassing the API.
pub async fn seed(store: &MemoryStore, id: &str, value: Value) {
    store
        .put(StoredRecord::new(id, doc(value)))
        .await
        .expect("seeding the memory store should succeed");
}

/// Send a request as `user_id`, with an optional JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user_id: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header("authorization", format!("Bearer {}", token_for(user_id)));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Send a request as `user_id` with a raw body and content type.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    user_id: &str,
    content_type: &str,
    body: &'static str,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token_for(user_id)))
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an unauthenticated GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

/// Send an authenticated GET request as `user_id`.
pub async fn get_as(app: Router, uri: &str, user_id: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(user_id), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
