// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.
//!
//! Every stored record carries its document key in an `_id` field so the
//! same JSON shape is used by the store and the API.

pub mod activity;
pub mod leaderboard;
pub mod team;
pub mod user;
pub mod workout;

pub use activity::{Activity, ActivityPayload};
pub use leaderboard::{LeaderboardEntry, LeaderboardType};
pub use team::{Team, TeamPayload};
pub use user::{User, UserPayload};
pub use workout::{Workout, WorkoutPayload};

use crate::db::SortKey;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use validator::Validate;

/// A record type stored in its own collection and exposed as a REST resource.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection holding the records.
    const COLLECTION: &'static str;
    /// Human-readable name used in error messages.
    const KIND: &'static str;
    /// Prefix for server-assigned keys.
    const ID_PREFIX: &'static str;
    /// Text fields matched by the `search` query parameter.
    const SEARCH_FIELDS: &'static [&'static str];
    /// Fields accepted as equality filters on list endpoints.
    const FILTER_FIELDS: &'static [&'static str];
    /// Fields accepted by the `ordering` query parameter.
    const ORDERING_FIELDS: &'static [&'static str];
    /// Ordering applied when the request names none.
    const DEFAULT_ORDERING: &'static [SortKey];

    fn id(&self) -> &str;
}

/// A resource whose records are built directly from a request payload.
pub trait Writable: Resource {
    type Payload: DeserializeOwned + Validate + Send;

    /// Key requested by the caller, if any.
    fn requested_id(payload: &Self::Payload) -> Option<&str>;

    /// Build the record to store. `existing` is the stored record on updates;
    /// optional payload fields fall back to it, then to defaults.
    fn build(
        id: String,
        payload: Self::Payload,
        existing: Option<&Self>,
        now: DateTime<Utc>,
    ) -> Self;
}

/// Deserialize a nullable payload field, keeping an explicit `null`
/// (`Some(None)`) apart from an absent key (`None`, via `#[serde(default)]`).
pub(crate) fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
