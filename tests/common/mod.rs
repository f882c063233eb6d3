// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use octofit_tracker::config::Config;
use octofit_tracker::db::DocumentStore;
use octofit_tracker::routes::create_router;
use octofit_tracker::services::Seeder;
use octofit_tracker::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// RNG seed used by seeded test apps.
#[allow(dead_code)]
pub const TEST_RNG_SEED: u64 = 42;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test app over an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_default(), DocumentStore::memory()));
    (create_router(state.clone()), state)
}

/// Create a test app whose store holds the sample dataset.
#[allow(dead_code)]
pub async fn create_seeded_app() -> (axum::Router, Arc<AppState>) {
    let (app, state) = create_test_app();
    Seeder::new(state.store.clone())
        .run_with_rng_seed(TEST_RNG_SEED)
        .await
        .expect("Seeding the memory store should succeed");
    (app, state)
}

/// Send one request and decode the JSON response body.
///
/// Bodies that are empty or not JSON decode as `Value::Null`.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// GET a URI and decode the response.
#[allow(dead_code)]
pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

/// Extract `_id` from every record of a JSON array.
#[allow(dead_code)]
pub fn ids(records: &Value) -> Vec<String> {
    records
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|r| r["_id"].as_str().unwrap_or_default().to_string())
        .collect()
}
