// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OctoFit Tracker API Server
//!
//! Serves the team fitness REST API, optionally seeding the store with
//! sample data before it starts listening.

use anyhow::Context;
use octofit_tracker::{
    config::Config, db::DocumentStore, logging::init_logging, services::Seeder, AppState,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        backend = ?config.store_backend,
        "Starting OctoFit Tracker API"
    );

    let store = DocumentStore::connect(&config)
        .await
        .context("Failed to connect to document store")?;

    // Seed before binding so seeding never overlaps API traffic.
    if config.seed_on_startup {
        let summary = Seeder::new(store.clone())
            .run()
            .await
            .context("Failed to seed document store")?;
        tracing::info!(
            users = summary.users,
            activities = summary.activities,
            "Seeded store on startup"
        );
    }

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), store));

    // Build router
    let app = octofit_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
