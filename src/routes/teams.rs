// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team routes.

use super::{json_body, DeleteResponse};
use crate::error::Result;
use crate::models::{Activity, Resource, Team, User};
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
        .route("/api/teams/", get(list_teams).post(create_team))
        .route(
            "/api/teams/{id}/",
            get(get_team)
                .put(replace_team)
                .patch(patch_team)
                .delete(delete_team),
        )
        .route("/api/teams/{id}/members/", get(team_members))
        .route("/api/teams/{id}/activities/", get(team_activities))
}

async fn list_teams(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Team>>> {
    let query = ListQuery::parse::<Team>(&params);
    Ok(Json(state.teams.list(&query).await?))
}

async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Team>> {
    Ok(Json(state.teams.get(&id).await?))
}

async fn create_team(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Team>)> {
    let team = state.teams.create(json_body(&body)?).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

async fn replace_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Team>> {
    Ok(Json(state.teams.replace(&id, json_body(&body)?).await?))
}

async fn patch_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Team>> {
    Ok(Json(state.teams.patch(&id, json_body(&body)?).await?))
}

async fn delete_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.teams.delete(&id).await?;
    Ok(DeleteResponse::deleted(Team::KIND, &id))
}

/// Users on a team.
async fn team_members(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<User>>> {
    let query = ListQuery::parse::<User>(&params);
    Ok(Json(state.teams.members(&id, query).await?))
}

/// Activities logged by a team's users.
async fn team_activities(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Activity>>> {
    let query = ListQuery::parse::<Activity>(&params);
    Ok(Json(state.teams.activities(&id, query).await?))
}
