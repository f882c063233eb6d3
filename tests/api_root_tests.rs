// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Discovery document and health check.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use octofit_tracker::config::Config;
use octofit_tracker::db::DocumentStore;
use octofit_tracker::routes::create_router;
use octofit_tracker::AppState;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_health() {
    let (app, _state) = common::create_test_app();

    let (status, body) = common::get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["build_id"].is_string());
}

#[tokio::test]
async fn test_root_uses_host_header() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::HOST, "fit.local:8080")
                .header("x-forwarded-proto", "https")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let root: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(root["teams"], "https://fit.local:8080/api/teams/");
    assert_eq!(root["users"], "https://fit.local:8080/api/users/");
    assert_eq!(root["workouts"], "https://fit.local:8080/api/workouts/");
    assert_eq!(root["activities"], "https://fit.local:8080/api/activities/");
    assert_eq!(root["leaderboard"], "https://fit.local:8080/api/leaderboard/");
}

#[tokio::test]
async fn test_root_prefers_codespace_name() {
    let mut config = Config::test_default();
    config.codespace_name = Some("octo-cat".to_string());
    let state = Arc::new(AppState::new(config, DocumentStore::memory()));
    let app = create_router(state);

    let (status, root) = common::get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        root["activities"],
        "https://octo-cat-8080.app.github.dev/api/activities/"
    );
}

#[tokio::test]
async fn test_cors_allows_frontend_origin() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/teams/")
                .header(header::ORIGIN, state.config.frontend_url.as_str())
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
}
