// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Team model for storage and API.

use super::{Resource, Writable};
use crate::db::{collections, SortKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Team stored in the `teams` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Team {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub created_at: DateTime<Utc>,
    /// Snapshot taken at seed time; user writes do not update it.
    pub member_count: u32,
}

/// Request body for creating or replacing a team.
#[derive(Debug, Deserialize, Validate)]
pub struct TeamPayload {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "may not be blank"))]
    pub description: String,
    #[serde(default, with = "crate::time_utils::rfc3339_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub member_count: Option<u32>,
}

impl Resource for Team {
    const COLLECTION: &'static str = collections::TEAMS;
    const KIND: &'static str = "Team";
    const ID_PREFIX: &'static str = "team";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description"];
    const FILTER_FIELDS: &'static [&'static str] = &[];
    const ORDERING_FIELDS: &'static [&'static str] = &["name", "created_at", "member_count"];
    const DEFAULT_ORDERING: &'static [SortKey] = &[SortKey::asc("name")];

    fn id(&self) -> &str {
        &self.id
    }
}

impl Writable for Team {
    type Payload = TeamPayload;

    fn requested_id(payload: &TeamPayload) -> Option<&str> {
        payload.id.as_deref()
    }

    fn build(
        id: String,
        payload: TeamPayload,
        existing: Option<&Team>,
        now: DateTime<Utc>,
    ) -> Team {
        Team {
            id,
            name: payload.name,
            description: payload.description,
            created_at: payload
                .created_at
                .or(existing.map(|t| t.created_at))
                .unwrap_or(now),
            member_count: payload
                .member_count
                .or(existing.map(|t| t.member_count))
                .unwrap_or(0),
        }
    }
}
