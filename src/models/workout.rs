// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout type model.

use super::{Resource, Writable};
use crate::db::{collections, SortKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Workout type stored in the `workouts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Workout {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Label for quantities, e.g. "km" or "reps"
    pub unit: String,
    pub points_per_unit: u32,
    pub description: String,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WorkoutPayload {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 10, message = "must be 1-10 characters"))]
    pub icon: String,
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub unit: String,
    pub points_per_unit: u32,
    #[validate(length(min = 1, message = "may not be blank"))]
    pub description: String,
    #[serde(default, with = "crate::time_utils::rfc3339_option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Workout {
    const COLLECTION: &'static str = collections::WORKOUTS;
    const KIND: &'static str = "Workout";
    const ID_PREFIX: &'static str = "workout";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description"];
    const FILTER_FIELDS: &'static [&'static str] = &[];
    const ORDERING_FIELDS: &'static [&'static str] = &["name", "points_per_unit"];
    const DEFAULT_ORDERING: &'static [SortKey] = &[SortKey::asc("name")];

    fn id(&self) -> &str {
        &self.id
    }
}

impl Writable for Workout {
    type Payload = WorkoutPayload;

    fn requested_id(payload: &WorkoutPayload) -> Option<&str> {
        payload.id.as_deref()
    }

    fn build(
        id: String,
        payload: WorkoutPayload,
        existing: Option<&Workout>,
        now: DateTime<Utc>,
    ) -> Workout {
        Workout {
            id,
            name: payload.name,
            icon: payload.icon,
            unit: payload.unit,
            points_per_unit: payload.points_per_unit,
            description: payload.description,
            created_at: payload
                .created_at
                .or(existing.map(|w| w.created_at))
                .unwrap_or(now),
        }
    }
}
