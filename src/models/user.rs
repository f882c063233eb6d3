// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User model for storage and API.

use super::{Resource, Writable};
use crate::db::{collections, SortKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// User profile stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Display handle
    pub alias: String,
    /// Unique across all users
    pub email: String,
    /// Team key (not enforced)
    pub team_id: String,
    pub total_points: u64,
    pub activities_completed: u32,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Request body for creating or replacing a user.
#[derive(Debug, Deserialize, Validate)]
pub struct UserPayload {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub alias: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub team_id: String,
    #[serde(default)]
    pub total_points: Option<u64>,
    #[serde(default)]
    pub activities_completed: Option<u32>,
    #[serde(default, with = "crate::time_utils::rfc3339_option")]
    pub joined_at: Option<DateTime<Utc>>,
    /// Absent keeps the stored image; `null` clears it.
    #[serde(default, deserialize_with = "super::explicit_null")]
    #[validate(url(message = "Enter a valid URL"), length(max = 500))]
    pub profile_image: Option<Option<String>>,
}

impl Resource for User {
    const COLLECTION: &'static str = collections::USERS;
    const KIND: &'static str = "User";
    const ID_PREFIX: &'static str = "user";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "alias", "email"];
    const FILTER_FIELDS: &'static [&'static str] = &["team_id"];
    const ORDERING_FIELDS: &'static [&'static str] =
        &["name", "total_points", "activities_completed", "joined_at"];
    const DEFAULT_ORDERING: &'static [SortKey] = &[SortKey::desc("total_points")];

    fn id(&self) -> &str {
        &self.id
    }
}

impl Writable for User {
    type Payload = UserPayload;

    fn requested_id(payload: &UserPayload) -> Option<&str> {
        payload.id.as_deref()
    }

    fn build(
        id: String,
        payload: UserPayload,
        existing: Option<&User>,
        now: DateTime<Utc>,
    ) -> User {
        User {
            id,
            name: payload.name,
            alias: payload.alias,
            email: payload.email,
            team_id: payload.team_id,
            total_points: payload
                .total_points
                .or(existing.map(|u| u.total_points))
                .unwrap_or(0),
            activities_completed: payload
                .activities_completed
                .or(existing.map(|u| u.activities_completed))
                .unwrap_or(0),
            joined_at: payload
                .joined_at
                .or(existing.map(|u| u.joined_at))
                .unwrap_or(now),
            profile_image: match payload.profile_image {
                Some(image) => image,
                None => existing.and_then(|u| u.profile_image.clone()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(value: serde_json::Value) -> UserPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_payload_requires_valid_email() {
        let p = payload(serde_json::json!({
            "name": "Tony Stark",
            "alias": "Iron Man",
            "email": "not-an-email",
            "team_id": "team_marvel",
        }));
        let errors = p.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_payload_rejects_bad_profile_image() {
        let p = payload(serde_json::json!({
            "name": "Tony Stark",
            "alias": "Iron Man",
            "email": "ironman@marvel.com",
            "team_id": "team_marvel",
            "profile_image": "nope",
        }));
        let errors = p.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("profile_image"));
    }

    #[test]
    fn test_build_defaults_counters() {
        let now = chrono::Utc::now();
        let p = payload(serde_json::json!({
            "name": "Tony Stark",
            "alias": "Iron Man",
            "email": "ironman@marvel.com",
            "team_id": "team_marvel",
        }));
        assert!(p.validate().is_ok());

        let user = User::build("user_x".to_string(), p, None, now);
        assert_eq!(user.total_points, 0);
        assert_eq!(user.activities_completed, 0);
        assert_eq!(user.joined_at, now);
        assert_eq!(user.profile_image, None);
    }

    #[test]
    fn test_build_profile_image_absent_keeps_null_clears() {
        let now = chrono::Utc::now();
        let base = serde_json::json!({
            "name": "Tony Stark",
            "alias": "Iron Man",
            "email": "ironman@marvel.com",
            "team_id": "team_marvel",
        });
        let mut existing = User::build("user_1".to_string(), payload(base.clone()), None, now);
        existing.profile_image = Some("https://example.com/tony.png".to_string());

        let kept = User::build("user_1".to_string(), payload(base.clone()), Some(&existing), now);
        assert_eq!(kept.profile_image, existing.profile_image);

        let mut clearing = base;
        clearing["profile_image"] = serde_json::Value::Null;
        let p = payload(clearing);
        assert!(p.validate().is_ok());
        let cleared = User::build("user_1".to_string(), p, Some(&existing), now);
        assert_eq!(cleared.profile_image, None);
    }
}
