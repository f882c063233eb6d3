// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Create, read, update and delete through the HTTP API.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{get, send};

#[tokio::test]
async fn test_team_create_get_delete() {
    let (app, _state) = common::create_test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/teams/",
        Some(json!({"name": "Team X", "description": "Mutants"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["_id"].as_str().unwrap().to_string();
    assert!(id.starts_with("team_"));
    assert_eq!(created["member_count"], 0);

    let (status, fetched) = get(&app, &format!("/api/teams/{}/", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = send(&app, "DELETE", &format!("/api/teams/{}/", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = get(&app, &format!("/api/teams/{}/", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_create_with_caller_key() {
    let (app, _state) = common::create_test_app();

    let body = json!({
        "_id": "workout_rowing",
        "name": "Rowing",
        "icon": "🚣",
        "unit": "km",
        "points_per_unit": 12,
        "description": "Rowing exercise",
    });
    let (status, created) = send(&app, "POST", "/api/workouts/", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["_id"], "workout_rowing");

    // Same key again is rejected
    let (status, error) = send(&app, "POST", "/api/workouts/", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["fields"]["_id"].is_array());
}

#[tokio::test]
async fn test_user_put_keeps_omitted_optional_fields() {
    let (app, _state) = common::create_seeded_app().await;

    let (_, before) = get(&app, "/api/users/user_1/").await;

    let (status, replaced) = send(
        &app,
        "PUT",
        "/api/users/user_1/",
        Some(json!({
            "name": "Anthony Stark",
            "alias": "Iron Man",
            "email": "ironman@marvel.com",
            "team_id": "team_marvel",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["name"], "Anthony Stark");
    assert_eq!(replaced["total_points"], before["total_points"]);
    assert_eq!(replaced["joined_at"], before["joined_at"]);
    assert_eq!(replaced["profile_image"], before["profile_image"]);
}

#[tokio::test]
async fn test_user_put_requires_full_payload() {
    let (app, _state) = common::create_seeded_app().await;

    let (status, error) = send(
        &app,
        "PUT",
        "/api/users/user_1/",
        Some(json!({"name": "Anthony Stark"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "validation_error");
}

#[tokio::test]
async fn test_patch_merges_fields() {
    let (app, _state) = common::create_seeded_app().await;

    let (status, patched) = send(
        &app,
        "PATCH",
        "/api/teams/team_dc/",
        Some(json!({"_id": "ignored", "description": "Justice League"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["_id"], "team_dc");
    assert_eq!(patched["name"], "Team DC");
    assert_eq!(patched["description"], "Justice League");
    assert_eq!(patched["member_count"], 6);

    let (_, fetched) = get(&app, "/api/teams/team_dc/").await;
    assert_eq!(fetched, patched);
}

#[tokio::test]
async fn test_unknown_key_is_not_found_for_every_verb() {
    let (app, _state) = common::create_test_app();

    let team = json!({"name": "Team X", "description": "Mutants"});
    for (method, body) in [
        ("GET", None),
        ("PUT", Some(team.clone())),
        ("PATCH", Some(json!({"name": "Y"}))),
        ("DELETE", None),
    ] {
        let (status, _) = send(&app, method, "/api/teams/team_nobody/", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} should be 404", method);
    }
}

#[tokio::test]
async fn test_delete_user_does_not_cascade() {
    let (app, _state) = common::create_seeded_app().await;

    let (_, before) = get(&app, "/api/users/user_3/activities/").await;
    let activity_ids = common::ids(&before);

    let (status, _) = send(&app, "DELETE", "/api/users/user_3/", None).await;
    assert_eq!(status, StatusCode::OK);

    for id in activity_ids {
        let (status, activity) = get(&app, &format!("/api/activities/{}/", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(activity["user_id"], "user_3");
    }
}

#[tokio::test]
async fn test_activity_create_derives_fields() {
    let (app, _state) = common::create_seeded_app().await;

    let (status, activity) = send(
        &app,
        "POST",
        "/api/activities/",
        Some(json!({
            "user_id": "user_8",
            "workout_id": "workout_7",
            "description": "Heavy bag workout",
            "quantity": 3,
            "points_earned": 999999,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(activity["user_name"], "Bruce Wayne");
    assert_eq!(activity["user_alias"], "Batman");
    assert_eq!(activity["team_id"], "team_dc");
    assert_eq!(activity["workout_name"], "Boxing");
    assert_eq!(activity["workout_icon"], "🥊");
    assert_eq!(activity["unit"], "rounds");
    assert_eq!(activity["points_earned"], 60);
}

#[tokio::test]
async fn test_activity_patch_rederives_only_on_input_change() {
    let (app, _state) = common::create_seeded_app().await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/activities/",
        Some(json!({
            "_id": "activity_test",
            "user_id": "user_1",
            "workout_id": "workout_1",
            "description": "Evening jog",
            "quantity": 5,
        })),
    )
    .await;
    assert_eq!(created["points_earned"], 50);

    // Later workout edits do not touch the stored snapshot.
    let (status, _) = send(
        &app,
        "PATCH",
        "/api/workouts/workout_1/",
        Some(json!({"points_per_unit": 100, "name": "Trail Running"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, described) = send(
        &app,
        "PATCH",
        "/api/activities/activity_test/",
        Some(json!({"description": "Long evening jog"})),
    )
    .await;
    assert_eq!(described["description"], "Long evening jog");
    assert_eq!(described["points_earned"], 50);
    assert_eq!(described["workout_name"], "Running");

    let (_, requantified) = send(
        &app,
        "PATCH",
        "/api/activities/activity_test/",
        Some(json!({"quantity": 2})),
    )
    .await;
    assert_eq!(requantified["points_earned"], 200);
    assert_eq!(requantified["workout_name"], "Trail Running");
    assert_eq!(requantified["completed_at"], created["completed_at"]);
}
