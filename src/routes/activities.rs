// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity routes.

use super::{json_body, DeleteResponse};
use crate::error::Result;
use crate::models::{Activity, Resource};
use crate::services::ListQuery;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities/", get(list_activities).post(create_activity))
        .route("/api/activities/recent/", get(recent_activities))
        .route(
            "/api/activities/{id}/",
            get(get_activity)
                .put(replace_activity)
                .patch(patch_activity)
                .delete(delete_activity),
        )
}

async fn list_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Activity>>> {
    let query = ListQuery::parse::<Activity>(&params);
    Ok(Json(state.activities.list(&query).await?))
}

/// Most recent activities; list parameters are ignored.
async fn recent_activities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Activity>>> {
    Ok(Json(state.activities.recent().await?))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Activity>> {
    Ok(Json(state.activities.get(&id).await?))
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Activity>)> {
    let activity = state.activities.create(json_body(&body)?).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

async fn replace_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Activity>> {
    Ok(Json(state.activities.replace(&id, json_body(&body)?).await?))
}

async fn patch_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Activity>> {
    Ok(Json(state.activities.patch(&id, json_body(&body)?).await?))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.activities.delete(&id).await?;
    Ok(DeleteResponse::deleted(Activity::KIND, &id))
}
