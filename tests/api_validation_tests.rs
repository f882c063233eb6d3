// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{get, send};

#[tokio::test]
async fn test_duplicate_email_rejected_and_original_unchanged() {
    let (app, _state) = common::create_seeded_app().await;
    let (_, original) = get(&app, "/api/users/user_1/").await;

    let (status, error) = send(
        &app,
        "POST",
        "/api/users/",
        Some(json!({
            "name": "Impostor",
            "alias": "Tin Man",
            "email": "ironman@marvel.com",
            "team_id": "team_dc",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["fields"]["email"].is_array());

    let (_, after) = get(&app, "/api/users/user_1/").await;
    assert_eq!(after, original);

    let (_, users) = get(&app, "/api/users/").await;
    assert_eq!(users.as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_patch_to_taken_email_rejected() {
    let (app, _state) = common::create_seeded_app().await;

    let (status, error) = send(
        &app,
        "PATCH",
        "/api/users/user_2/",
        Some(json!({"email": "batman@dc.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["fields"]["email"].is_array());

    let (_, user) = get(&app, "/api/users/user_2/").await;
    assert_eq!(user["email"], "cap@marvel.com");
}

#[tokio::test]
async fn test_user_may_keep_own_email() {
    let (app, _state) = common::create_seeded_app().await;

    let (status, user) = send(
        &app,
        "PATCH",
        "/api/users/user_2/",
        Some(json!({"email": "cap@marvel.com", "alias": "Cap"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["alias"], "Cap");
}

#[tokio::test]
async fn test_invalid_user_fields_reported_per_field() {
    let (app, _state) = common::create_test_app();

    let (status, error) = send(
        &app,
        "POST",
        "/api/users/",
        Some(json!({
            "name": "",
            "alias": "Nobody",
            "email": "not-an-email",
            "team_id": "team_marvel",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "validation_error");
    assert!(error["fields"]["name"].is_array());
    assert!(error["fields"]["email"].is_array());
    assert!(error["fields"].get("alias").is_none());
}

#[tokio::test]
async fn test_activity_unknown_references() {
    let (app, _state) = common::create_seeded_app().await;

    let (status, error) = send(
        &app,
        "POST",
        "/api/activities/",
        Some(json!({
            "user_id": "user_404",
            "workout_id": "workout_404",
            "description": "Ghost run",
            "quantity": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["fields"]["user_id"].is_array());
    assert!(error["fields"]["workout_id"].is_array());
}

#[tokio::test]
async fn test_activity_quantity_must_be_positive() {
    let (app, _state) = common::create_seeded_app().await;

    let (status, error) = send(
        &app,
        "POST",
        "/api/activities/",
        Some(json!({
            "user_id": "user_1",
            "workout_id": "workout_1",
            "description": "Standing still",
            "quantity": 0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["fields"]["quantity"].is_array());
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/teams/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(error["fields"]["non_field_errors"].is_array());
}

#[tokio::test]
async fn test_bad_caller_key_rejected() {
    let (app, _state) = common::create_test_app();

    let (status, error) = send(
        &app,
        "POST",
        "/api/teams/",
        Some(json!({"_id": "has spaces", "name": "T", "description": "D"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["fields"]["_id"].is_array());
}

#[tokio::test]
async fn test_unknown_ordering_field_falls_back_to_default() {
    let (app, _state) = common::create_seeded_app().await;

    let (status, teams) = get(&app, "/api/teams/?ordering=bogus").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::ids(&teams), ["team_dc", "team_marvel"]);

    let (status, workouts) = get(&app, "/api/workouts/?ordering=-calories,-points_per_unit").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(workouts[0]["name"], "Boxing");
}

#[tokio::test]
async fn test_patch_body_must_be_object() {
    let (app, _state) = common::create_seeded_app().await;

    let (status, error) = send(&app, "PATCH", "/api/teams/team_dc/", Some(json!(["name"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "bad_request");
}

#[tokio::test]
async fn test_invalid_route_key_is_not_found() {
    let (app, _state) = common::create_seeded_app().await;

    let (status, error) = get(&app, "/api/teams/a%2Fb/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "not_found");

    let (status, _) = send(&app, "DELETE", "/api/users/no%20such%20user/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_image_can_be_cleared() {
    let (app, _state) = common::create_seeded_app().await;

    let (status, user) = send(
        &app,
        "PATCH",
        "/api/users/user_1/",
        Some(json!({"profile_image": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(user["profile_image"].is_null());

    let (_, fetched) = get(&app, "/api/users/user_1/").await;
    assert!(fetched["profile_image"].is_null());
}

#[tokio::test]
async fn test_leaderboard_is_read_only() {
    let (app, _state) = common::create_seeded_app().await;

    let entry = json!({"type": "team", "rank": 1});
    let (status, _) = send(&app, "POST", "/api/leaderboard/", Some(entry.clone())).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    for method in ["PUT", "PATCH", "DELETE"] {
        let (status, _) = send(
            &app,
            method,
            "/api/leaderboard/leaderboard_user_1/",
            Some(entry.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", method);
    }
}
