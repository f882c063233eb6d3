// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity service.
//!
//! Activities copy the current user and workout fields, and compute
//! `points_earned`, whenever their inputs are written. The copies are
//! snapshots: later edits to the user or workout do not touch them.

use super::resource::{decode_payload, merge_patch, resolve_id, ListQuery, ResourceService};
use crate::db::{DocumentStore, SortKey, StoreQuery};
use crate::error::{AppError, FieldErrors, Result};
use crate::models::{Activity, ActivityPayload, Resource, User, Workout};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Number of activities returned by [`ActivityService::recent`].
pub const RECENT_LIMIT: u32 = 20;

#[derive(Clone)]
pub struct ActivityService {
    activities: ResourceService<Activity>,
    users: ResourceService<User>,
    workouts: ResourceService<Workout>,
}

impl ActivityService {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            activities: ResourceService::new(store.clone()),
            users: ResourceService::new(store.clone()),
            workouts: ResourceService::new(store),
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Activity>> {
        self.activities.list(query).await
    }

    pub async fn get(&self, id: &str) -> Result<Activity> {
        self.activities.get(id).await
    }

    pub async fn create(&self, body: Value) -> Result<Activity> {
        let payload: ActivityPayload = decode_payload(body)?;
        let id = resolve_id::<Activity>(payload.id.as_deref())?;
        let activity = self.snapshot(id, payload, Utc::now()).await?;

        self.activities.insert(&activity).await?;
        tracing::debug!(
            activity_id = %activity.id,
            user_id = %activity.user_id,
            points = activity.points_earned,
            "Logged activity"
        );
        Ok(activity)
    }

    /// Replace an activity, taking a fresh snapshot of its user and workout.
    pub async fn replace(&self, id: &str, body: Value) -> Result<Activity> {
        let existing = self.activities.get(id).await?;
        let payload: ActivityPayload = decode_payload(body)?;
        let activity = self
            .snapshot(id.to_string(), payload, existing.completed_at)
            .await?;

        self.activities.save(&activity).await?;
        Ok(activity)
    }

    /// Partially update an activity.
    ///
    /// The snapshot is retaken only when the user, workout or quantity changes.
    pub async fn patch(&self, id: &str, body: Value) -> Result<Activity> {
        let existing = self.activities.get(id).await?;
        let merged = merge_patch(&existing, body)?;
        let payload: ActivityPayload = decode_payload(merged)?;

        let inputs_changed = payload.user_id != existing.user_id
            || payload.workout_id != existing.workout_id
            || payload.quantity != existing.quantity;

        let activity = if inputs_changed {
            self.snapshot(id.to_string(), payload, existing.completed_at)
                .await?
        } else {
            Activity {
                description: payload.description,
                completed_at: payload.completed_at.unwrap_or(existing.completed_at),
                ..existing
            }
        };

        self.activities.save(&activity).await?;
        Ok(activity)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.activities.delete(id).await
    }

    /// The most recently completed activities across all users.
    pub async fn recent(&self) -> Result<Vec<Activity>> {
        let query = StoreQuery::new()
            .order_by(&[SortKey::desc("completed_at")])
            .limit(RECENT_LIMIT);
        self.activities
            .store()
            .find(Activity::COLLECTION, &query)
            .await
    }

    async fn snapshot(
        &self,
        id: String,
        payload: ActivityPayload,
        default_completed_at: DateTime<Utc>,
    ) -> Result<Activity> {
        let (user, workout) = self
            .resolve_references(&payload.user_id, &payload.workout_id)
            .await?;

        Ok(Activity::snapshot(
            id,
            &user,
            &workout,
            payload.description,
            payload.quantity,
            payload.completed_at.unwrap_or(default_completed_at),
        ))
    }

    /// Load the referenced user and workout, reporting every unknown key.
    async fn resolve_references(&self, user_id: &str, workout_id: &str) -> Result<(User, Workout)> {
        let user = self.users.find(user_id).await?;
        let workout = self.workouts.find(workout_id).await?;

        match (user, workout) {
            (Some(user), Some(workout)) => Ok((user, workout)),
            (user, workout) => {
                let mut fields = FieldErrors::new();
                if user.is_none() {
                    fields.insert(
                        "user_id".to_string(),
                        vec![format!("Unknown user '{}'", user_id)],
                    );
                }
                if workout.is_none() {
                    fields.insert(
                        "workout_id".to_string(),
                        vec![format!("Unknown workout '{}'", workout_id)],
                    );
                }
                Err(AppError::Validation(fields))
            }
        }
    }
}
