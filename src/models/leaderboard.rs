// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Leaderboard snapshot entries.

use super::Resource;
use crate::db::{collections, SortKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Which ranking an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardType {
    Individual,
    Team,
}

impl LeaderboardType {
    pub fn as_str(self) -> &'static str {
        match self {
            LeaderboardType::Individual => "individual",
            LeaderboardType::Team => "team",
        }
    }
}

/// One ranked row of the leaderboard snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct LeaderboardEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: LeaderboardType,
    /// 1-based, lower is better
    pub rank: u32,
    /// User or team key
    pub entity_id: String,
    pub entity_name: String,
    #[serde(default)]
    pub entity_alias: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    pub total_points: u64,
    /// Individual entries only
    #[serde(default)]
    pub activities_count: Option<u32>,
    /// Team entries only
    #[serde(default)]
    pub member_count: Option<u32>,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

impl Resource for LeaderboardEntry {
    const COLLECTION: &'static str = collections::LEADERBOARD;
    const KIND: &'static str = "Leaderboard entry";
    const ID_PREFIX: &'static str = "leaderboard";
    const SEARCH_FIELDS: &'static [&'static str] = &[];
    const FILTER_FIELDS: &'static [&'static str] = &["type"];
    const ORDERING_FIELDS: &'static [&'static str] = &["rank", "total_points"];
    const DEFAULT_ORDERING: &'static [SortKey] = &[SortKey::asc("rank")];

    fn id(&self) -> &str {
        &self.id
    }
}
