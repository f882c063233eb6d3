// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activities;
pub mod leaderboard;
pub mod resource;
pub mod seed;
pub mod teams;
pub mod users;

pub use activities::{ActivityService, RECENT_LIMIT};
pub use leaderboard::{derive_leaderboard, rank_individuals, rank_teams, LeaderboardService};
pub use resource::{ListQuery, ResourceService};
pub use seed::{SeedData, SeedSummary, Seeder};
pub use teams::TeamService;
pub use users::UserService;
