// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes.

use super::{json_body, DeleteResponse};
use crate::error::Result;
use crate::models::{Activity, Resource, User};
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
        .route("/api/users/", get(list_users).post(create_user))
        .route(
            "/api/users/{id}/",
            get(get_user)
                .put(replace_user)
                .patch(patch_user)
                .delete(delete_user),
        )
        .route("/api/users/{id}/activities/", get(user_activities))
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<User>>> {
    let query = ListQuery::parse::<User>(&params);
    Ok(Json(state.users.list(&query).await?))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    Ok(Json(state.users.get(&id).await?))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<User>)> {
    let user = state.users.create(json_body(&body)?).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn replace_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<User>> {
    Ok(Json(state.users.replace(&id, json_body(&body)?).await?))
}

async fn patch_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<User>> {
    Ok(Json(state.users.patch(&id, json_body(&body)?).await?))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.users.delete(&id).await?;
    Ok(DeleteResponse::deleted(User::KIND, &id))
}

async fn user_activities(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Activity>>> {
    let query = ListQuery::parse::<Activity>(&params);
    Ok(Json(state.users.activities(&id, query).await?))
}
