// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Logged activity model.

use super::{Resource, User, Workout};
use crate::db::{collections, SortKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Stored activity record.
///
/// The user, workout and team fields are copies taken when the activity was
/// written. They are not kept in sync with later edits to the source records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Activity {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_alias: String,
    pub workout_id: String,
    pub workout_name: String,
    pub workout_icon: String,
    pub description: String,
    pub quantity: u32,
    pub unit: String,
    /// quantity × points_per_unit of the workout at write time
    pub points_earned: u64,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub completed_at: DateTime<Utc>,
    pub team_id: String,
}

/// Fields a caller may set on an activity. Everything else is derived.
#[derive(Debug, Deserialize, Validate)]
pub struct ActivityPayload {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub user_id: String,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub workout_id: String,
    #[validate(length(min = 1, message = "may not be blank"))]
    pub description: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: u32,
    #[serde(default, with = "crate::time_utils::rfc3339_option")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Activity {
    /// Build an activity, copying snapshot fields from its user and workout.
    pub fn snapshot(
        id: String,
        user: &User,
        workout: &Workout,
        description: String,
        quantity: u32,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_alias: user.alias.clone(),
            workout_id: workout.id.clone(),
            workout_name: workout.name.clone(),
            workout_icon: workout.icon.clone(),
            description,
            quantity,
            unit: workout.unit.clone(),
            points_earned: u64::from(quantity) * u64::from(workout.points_per_unit),
            completed_at,
            team_id: user.team_id.clone(),
        }
    }
}

impl Resource for Activity {
    const COLLECTION: &'static str = collections::ACTIVITIES;
    const KIND: &'static str = "Activity";
    const ID_PREFIX: &'static str = "activity";
    const SEARCH_FIELDS: &'static [&'static str] =
        &["user_name", "user_alias", "workout_name", "description"];
    const FILTER_FIELDS: &'static [&'static str] = &["user_id", "workout_id", "team_id"];
    const ORDERING_FIELDS: &'static [&'static str] = &["completed_at", "points_earned", "quantity"];
    const DEFAULT_ORDERING: &'static [SortKey] = &[SortKey::desc("completed_at")];

    fn id(&self) -> &str {
        &self.id
    }
}
