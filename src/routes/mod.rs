// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod activities;
pub mod leaderboard;
pub mod teams;
pub mod users;
pub mod workouts;

use crate::error::Result;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Collection URLs advertised at the API root.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct ApiRoot {
    pub teams: String,
    pub users: String,
    pub workouts: String,
    pub activities: String,
    pub leaderboard: String,
}

impl ApiRoot {
    fn new(base_url: &str) -> Self {
        let url = |resource: &str| format!("{}api/{}/", base_url, resource);
        Self {
            teams: url("teams"),
            users: url("users"),
            workouts: url("workouts"),
            activities: url("activities"),
            leaderboard: url("leaderboard"),
        }
    }
}

/// Discovery document listing the resource collections.
async fn api_root(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<ApiRoot> {
    let base_url = state
        .config
        .configured_base_url()
        .unwrap_or_else(|| request_base_url(&headers, state.config.port));
    Json(ApiRoot::new(&base_url))
}

/// Base URL as seen by the client, from the forwarded scheme and Host header.
fn request_base_url(headers: &HeaderMap, port: u16) -> String {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let scheme = header_str("x-forwarded-proto")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .unwrap_or("http");

    match header_str(header::HOST.as_str()) {
        Some(host) => format!("{}://{}/", scheme, host),
        None => format!("{}://localhost:{}/", scheme, port),
    }
}

/// Response for deletions.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub(crate) fn deleted(kind: &str, id: &str) -> Json<Self> {
        Json(Self {
            success: true,
            message: format!("{} {} deleted", kind, id),
        })
    }
}

/// Decode a request body as JSON.
///
/// Malformed bodies become validation errors rather than axum rejections,
/// so every client error shares the same response shape.
pub(crate) fn json_body(body: &Bytes) -> Result<Value> {
    Ok(serde_json::from_slice(body)?)
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/", get(api_root))
        .route("/health", get(health_check))
        .merge(teams::routes())
        .merge(users::routes())
        .merge(workouts::routes())
        .merge(activities::routes())
        .merge(leaderboard::routes())
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
