// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! OctoFit Tracker: team fitness tracking backend
//!
//! This crate provides the REST API for teams, users, workouts, logged
//! activities and the leaderboard, plus the sample data seeder.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::DocumentStore;
use models::Workout;
use services::{ActivityService, LeaderboardService, ResourceService, TeamService, UserService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: DocumentStore,
    pub teams: TeamService,
    pub users: UserService,
    pub workouts: ResourceService<Workout>,
    pub activities: ActivityService,
    pub leaderboard: LeaderboardService,
}

impl AppState {
    pub fn new(config: Config, store: DocumentStore) -> Self {
        Self {
            config,
            teams: TeamService::new(store.clone()),
            users: UserService::new(store.clone()),
            workouts: ResourceService::new(store.clone()),
            activities: ActivityService::new(store.clone()),
            leaderboard: LeaderboardService::new(store.clone()),
            store,
        }
    }
}
