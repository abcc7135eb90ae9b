// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Authentication and Authorization Integration Tests
//!
//! Drives the full router through tower and checks the HTTP contract:
//!
//! - `test_auth_*`: bearer extraction, verification, identity loading
//! - `test_permission_*`: per-route permission enforcement
//! - `test_login_*`: the credential exchange endpoint
//! - `test_store_*`: store failure and timeout mapping
//! - `test_error_*`: rejection body shape and message uniformity

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use planta_api::ApiServerBuilder;
use planta_core::TokenClaims;
use tower::ServiceExt;

use planta_tests::common::{
    init_test_logging, router_over, seeded_router, test_api_config, test_codec, FailingStore,
    HangingStore, INACTIVE_ID, ROLELESS_ID, SUPERVISOR_ID, TECHNICIAN_ID,
};

// =============================================================================
// Request Helpers
// =============================================================================

fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

fn post_json(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

/// Asserts the uniform rejection shape and returns the message.
fn rejection_message(body: &serde_json::Value) -> String {
    assert_eq!(body["success"], serde_json::json!(false));
    let message = body["message"].as_str().expect("message string");
    assert!(!message.is_empty());
    message.to_string()
}

// =============================================================================
// Authentication Tests
// =============================================================================

#[tokio::test]
async fn test_auth_valid_token_loads_identity_in_one_fetch() {
    init_test_logging();
    let (router, codec, store) = seeded_router().await;
    let token = codec.issue(TECHNICIAN_ID).expect("token");

    let response = router.oneshot(get("/api/v1/auth/me", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.lookup_count(), 1);

    let body = body_json(response).await;
    assert_eq!(body["success"], serde_json::json!(true));
    assert_eq!(body["data"]["username"], "tecnico1");
    assert_eq!(body["data"]["roles"][0], "tecnico");
    assert_eq!(body["data"]["permissions"][0], "ver_lineas");
}

#[tokio::test]
async fn test_auth_missing_header_rejected_without_store_access() {
    init_test_logging();
    let (router, _, store) = seeded_router().await;

    let response = router.oneshot(get("/api/v1/auth/me", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.lookup_count(), 0);

    rejection_message(&body_json(response).await);
}

#[tokio::test]
async fn test_auth_malformed_token_rejected_without_store_access() {
    init_test_logging();
    let (router, _, store) = seeded_router().await;

    let response = router
        .oneshot(get("/api/v1/auth/me", Some("tam.pered.token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.lookup_count(), 0);
}

#[tokio::test]
async fn test_auth_expired_token_indistinguishable_from_forged() {
    init_test_logging();
    let (router, codec, _) = seeded_router().await;

    let expired = codec
        .sign(&TokenClaims::new(TECHNICIAN_ID, -120))
        .expect("expired token");

    let expired_response = router
        .clone()
        .oneshot(get("/api/v1/auth/me", Some(&expired)))
        .await
        .unwrap();
    assert_eq!(expired_response.status(), StatusCode::UNAUTHORIZED);
    let expired_message = rejection_message(&body_json(expired_response).await);

    let forged_response = router
        .oneshot(get("/api/v1/auth/me", Some("no.es.untoken")))
        .await
        .unwrap();
    assert_eq!(forged_response.status(), StatusCode::UNAUTHORIZED);
    let forged_message = rejection_message(&body_json(forged_response).await);

    // The caller cannot tell expired from forged.
    assert_eq!(expired_message, forged_message);
}

#[tokio::test]
async fn test_auth_unknown_identity_rejected() {
    init_test_logging();
    let (router, codec, store) = seeded_router().await;
    let token = codec.issue(999).expect("token");

    let response = router.oneshot(get("/api/v1/auth/me", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.lookup_count(), 1);
}

#[tokio::test]
async fn test_auth_inactive_user_rejected_until_reactivated() {
    init_test_logging();
    let (router, codec, store) = seeded_router().await;
    let token = codec.issue(INACTIVE_ID).expect("token");

    let response = router
        .clone()
        .oneshot(get("/api/v1/auth/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    store.set_active(INACTIVE_ID, true).await;

    let response = router.oneshot(get("/api/v1/auth/me", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_auth_health_endpoints_are_public() {
    init_test_logging();
    let (router, _, _) = seeded_router().await;

    let response = router.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Permission Tests
// =============================================================================

#[tokio::test]
async fn test_permission_route_enforcement() {
    init_test_logging();
    let (router, codec, _) = seeded_router().await;

    let technician = codec.issue(TECHNICIAN_ID).expect("token");
    let supervisor = codec.issue(SUPERVISOR_ID).expect("token");

    // The technician can see lines but not cables.
    let response = router
        .clone()
        .oneshot(get("/api/v1/lineas", Some(&technician)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(get("/api/v1/cables", Some(&technician)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The supervisor can see both.
    let response = router
        .clone()
        .oneshot(get("/api/v1/lineas", Some(&supervisor)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(get("/api/v1/cables", Some(&supervisor)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_permission_user_without_roles_forbidden() {
    init_test_logging();
    let (router, codec, _) = seeded_router().await;
    let token = codec.issue(ROLELESS_ID).expect("token");

    let response = router
        .oneshot(get("/api/v1/lineas", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["message"], "El usuario no tiene roles asignados");
}

#[tokio::test]
async fn test_permission_legacy_association_keys_grant_access() {
    init_test_logging();
    let store = planta_tests::common::seeded_store().await;
    store
        .ingest_raw_user(&serde_json::json!({
            "id": 50,
            "usuario": "heredado",
            "activo": true,
            "tb_rol": [{
                "id": 9,
                "nombre": "lector",
                "tb_permiso": [{"id": 10, "nombre": "ver_lineas"}]
            }]
        }))
        .await
        .expect("legacy ingest");

    let router = router_over(store);
    let token = test_codec().issue(50).expect("token");

    let response = router
        .oneshot(get("/api/v1/lineas", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Login Tests
// =============================================================================

#[tokio::test]
async fn test_login_issues_working_token() {
    init_test_logging();
    let (router, _, _) = seeded_router().await;

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/login",
            serde_json::json!({"username": "tecnico1", "password": "clave-tecnico"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    let token = body["token"].as_str().expect("token").to_string();

    let response = router.oneshot(get("/api/v1/auth/me", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user_look_alike() {
    init_test_logging();
    let (router, _, _) = seeded_router().await;

    let wrong_password = router
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/login",
            serde_json::json!({"username": "tecnico1", "password": "incorrecta"}),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_message = rejection_message(&body_json(wrong_password).await);

    let unknown_user = router
        .oneshot(post_json(
            "/api/v1/auth/login",
            serde_json::json!({"username": "fantasma", "password": "incorrecta"}),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user_message = rejection_message(&body_json(unknown_user).await);

    assert_eq!(wrong_password_message, unknown_user_message);
    assert!(!unknown_user_message.contains("fantasma"));
}

#[tokio::test]
async fn test_login_empty_fields_rejected() {
    init_test_logging();
    let (router, _, _) = seeded_router().await;

    let response = router
        .oneshot(post_json(
            "/api/v1/auth/login",
            serde_json::json!({"username": "", "password": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Store Failure Tests
// =============================================================================

#[tokio::test]
async fn test_store_backend_failure_maps_to_500() {
    init_test_logging();
    let router = router_over(Arc::new(FailingStore::new()));
    let token = test_codec().issue(TECHNICIAN_ID).expect("token");

    let response = router.oneshot(get("/api/v1/auth/me", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    rejection_message(&body_json(response).await);
}

#[tokio::test]
async fn test_store_timeout_maps_to_500() {
    init_test_logging();
    let mut config = test_api_config();
    config.store_timeout = Duration::from_millis(50);

    let router = ApiServerBuilder::new()
        .config(config)
        .store(Arc::new(HangingStore::new()))
        .build()
        .expect("server")
        .router();
    let token = test_codec().issue(TECHNICIAN_ID).expect("token");

    let response = router.oneshot(get("/api/v1/auth/me", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Error Body Tests
// =============================================================================

#[tokio::test]
async fn test_error_bodies_never_leak_internals() {
    init_test_logging();
    let (router, codec, _) = seeded_router().await;
    let token = codec.issue(TECHNICIAN_ID).expect("token");

    let response = router
        .oneshot(get("/api/v1/cables", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    let message = rejection_message(&body);
    // The required permission name stays server-side.
    assert!(!message.contains("ver_cables"));
    assert!(body.get("data").is_none() || body["data"].is_null());
}
