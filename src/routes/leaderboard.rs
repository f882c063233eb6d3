// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only leaderboard routes.

use crate::error::Result;
use crate::models::{LeaderboardEntry, LeaderboardType};
use crate::services::ListQuery;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/leaderboard/", get(list_entries))
        .route("/api/leaderboard/individual/", get(individual_rankings))
        .route("/api/leaderboard/team/", get(team_rankings))
        .route("/api/leaderboard/{id}/", get(get_entry))
}

async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let query = ListQuery::parse::<LeaderboardEntry>(&params);
    Ok(Json(state.leaderboard.list(&query).await?))
}

async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LeaderboardEntry>> {
    Ok(Json(state.leaderboard.get(&id).await?))
}

async fn individual_rankings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(
        state.leaderboard.by_type(LeaderboardType::Individual).await?,
    ))
}

async fn team_rankings(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(state.leaderboard.by_type(LeaderboardType::Team).await?))
}
