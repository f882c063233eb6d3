// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout routes. Workouts have no rules beyond field validation.

use super::{json_body, DeleteResponse};
use crate::error::Result;
use crate::models::{Resource, Workout};
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
        .route("/api/workouts/", get(list_workouts).post(create_workout))
        .route(
            "/api/workouts/{id}/",
            get(get_workout)
                .put(replace_workout)
                .patch(patch_workout)
                .delete(delete_workout),
        )
}

async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Workout>>> {
    let query = ListQuery::parse::<Workout>(&params);
    Ok(Json(state.workouts.list(&query).await?))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Workout>> {
    Ok(Json(state.workouts.get(&id).await?))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Workout>)> {
    let workout = state.workouts.create(json_body(&body)?).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

async fn replace_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Workout>> {
    Ok(Json(state.workouts.replace(&id, json_body(&body)?).await?))
}

async fn patch_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Workout>> {
    Ok(Json(state.workouts.patch(&id, json_body(&body)?).await?))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.workouts.delete(&id).await?;
    Ok(DeleteResponse::deleted(Workout::KIND, &id))
}
