// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard derivation and the read-only leaderboard service.
//!
//! The leaderboard is a snapshot: it is computed from users and teams when
//! the store is seeded and stored as plain rows. Nothing recomputes it when
//! users or activities change afterwards.

use super::resource::{ListQuery, ResourceService};
use crate::db::DocumentStore;
use crate::error::Result;
use crate::models::{LeaderboardEntry, LeaderboardType, Team, User};
use chrono::{DateTime, Utc};

/// Rank users by total points, highest first.
///
/// The sort is stable, so users with equal points keep their input order.
pub fn rank_individuals(users: &[User], now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&User> = users.iter().collect();
    ranked.sort_by(|a, b| b.total_points.cmp(&a.total_points));

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, user)| {
            let rank = index as u32 + 1;
            LeaderboardEntry {
                id: format!("leaderboard_user_{}", rank),
                entry_type: LeaderboardType::Individual,
                rank,
                entity_id: user.id.clone(),
                entity_name: user.name.clone(),
                entity_alias: Some(user.alias.clone()),
                team_id: Some(user.team_id.clone()),
                total_points: user.total_points,
                activities_count: Some(user.activities_completed),
                member_count: None,
                updated_at: now,
            }
        })
        .collect()
}

/// Rank teams by the summed points of their users, highest first.
///
/// Equal sums are ordered by team key.
pub fn rank_teams(teams: &[Team], users: &[User], now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
    let mut totals: Vec<(&Team, u64, u32)> = teams
        .iter()
        .map(|team| {
            let members = users.iter().filter(|user| user.team_id == team.id);
            let (points, count) = members.fold((0u64, 0u32), |(points, count), user| {
                (points + user.total_points, count + 1)
            });
            (team, points, count)
        })
        .collect();

    totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));

    totals
        .into_iter()
        .enumerate()
        .map(|(index, (team, points, members))| {
            let rank = index as u32 + 1;
            LeaderboardEntry {
                id: format!("leaderboard_team_{}", rank),
                entry_type: LeaderboardType::Team,
                rank,
                entity_id: team.id.clone(),
                entity_name: team.name.clone(),
                entity_alias: None,
                team_id: None,
                total_points: points,
                activities_count: None,
                member_count: Some(members),
                updated_at: now,
            }
        })
        .collect()
}

/// Full snapshot: individual entries first, then team entries.
pub fn derive_leaderboard(
    teams: &[Team],
    users: &[User],
    now: DateTime<Utc>,
) -> Vec<LeaderboardEntry> {
    let mut entries = rank_individuals(users, now);
    entries.extend(rank_teams(teams, users, now));
    entries
}

/// Read-only access to stored leaderboard rows.
#[derive(Clone)]
pub struct LeaderboardService {
    entries: ResourceService<LeaderboardEntry>,
}

impl LeaderboardService {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            entries: ResourceService::new(store),
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<LeaderboardEntry>> {
        self.entries.list(query).await
    }

    pub async fn get(&self, id: &str) -> Result<LeaderboardEntry> {
        self.entries.get(id).await
    }

    /// Entries of one ranking, best rank first.
    pub async fn by_type(&self, entry_type: LeaderboardType) -> Result<Vec<LeaderboardEntry>> {
        let query =
            ListQuery::defaults::<LeaderboardEntry>().with_filter("type", entry_type.as_str());
        self.entries.list(&query).await
    }
}
