// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sample data seeder for OctoFit Tracker.
//!
//! Wipes every collection in the configured store and writes two teams of
//! superheroes with their workouts, activities and leaderboard.
//!
//! Usage:
//! ```bash
//! # Seed the Firestore emulator
//! FIRESTORE_EMULATOR_HOST=localhost:8181 STORE_BACKEND=firestore \
//!     cargo run --bin octofit-seed -- --yes
//!
//! # Reproducible dataset
//! cargo run --bin octofit-seed -- --yes --rng-seed 42
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use octofit_tracker::{config::Config, db::DocumentStore, logging::init_logging, services::Seeder};

#[derive(Parser)]
#[command(
    name = "octofit-seed",
    about = "OctoFit Tracker sample data seeder",
    long_about = "Delete all existing data and populate the store with sample teams, users, workouts, activities and leaderboard entries"
)]
struct SeedArgs {
    /// Confirm that all existing data may be deleted
    #[arg(long)]
    yes: bool,

    /// Seed the random generator for a reproducible dataset
    #[arg(long)]
    rng_seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();
    init_logging();

    if !args.yes {
        bail!("Refusing to wipe the store without --yes");
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    let store = DocumentStore::connect(&config)
        .await
        .context("Failed to connect to document store")?;

    if store.backend_name() == "memory" {
        tracing::warn!("Seeding the in-memory store; the data is lost when this process exits");
    }

    let seeder = Seeder::new(store);
    let summary = match args.rng_seed {
        Some(seed) => seeder.run_with_rng_seed(seed).await,
        None => seeder.run().await,
    }
    .context("Seeding failed")?;

    println!("Database population completed\n{}", summary);
    Ok(())
}
