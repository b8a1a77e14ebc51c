//! Integration tests for the `/profile` endpoints.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use cifan_db::store::{MemoryStore, RecordStore};
use common::{body_json, build_test_app, get_as, send};
use serde_json::json;

#[tokio::test]
async fn missing_profile_is_not_found() {
    let app = build_test_app(Arc::new(MemoryStore::new()));

    let response = get_as(app, "/api/v1/profile", "u1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_then_read_profile() {
    let store = Arc::new(MemoryStore::new());
    let app = build_test_app(Arc::clone(&store));

    let response = send(
        app.clone(),
        Method::PUT,
        "/api/v1/profile",
        Some("u1"),
        Some(json!({
            "fullNameEN": " Somchai Jaidee ",
            "fullNameTH": "สมชาย ใจดี",
            "birthDate": "2007-03-14",
            "phoneNumber": "081-234-5678"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["fullNameEN"], "Somchai Jaidee");
    assert_eq!(json["data"]["phoneNumber"], "0812345678");

    let response = get_as(app, "/api/v1/profile", "u1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["fullNameTH"], "สมชาย ใจดี");
    assert_eq!(json["data"]["birthDate"], "2007-03-14");

    assert!(store.get_profile("u2").await.unwrap().is_none());
}

#[tokio::test]
async fn invalid_profile_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = build_test_app(Arc::clone(&store));

    let response = send(
        app,
        Method::PUT,
        "/api/v1/profile?lang=th",
        Some("u1"),
        Some(json!({
            "fullNameEN": "Somchai",
            "birthDate": "2007-03-14",
            "phoneNumber": "12"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "ข้อมูลบางช่องไม่ถูกต้อง");
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn mistyped_profile_field_is_a_localized_bad_request() {
    let store = Arc::new(MemoryStore::new());
    let app = build_test_app(Arc::clone(&store));

    let response = send(
        app,
        Method::PUT,
        "/api/v1/profile",
        Some("u1"),
        Some(json!({
            "fullNameEN": "Somchai",
            "birthDate": "14/03/2007",
            "phoneNumber": "0812345678"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Some fields are invalid");
    assert!(json["detail"].as_str().unwrap().contains("birthDate"));
    assert_eq!(store.write_count(), 0);
}
