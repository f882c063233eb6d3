// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User service with email uniqueness.

use super::resource::{ListQuery, ResourceService};
use crate::db::{DocumentStore, StoreQuery};
use crate::error::{AppError, Result};
use crate::models::{Activity, Resource, User};
use serde_json::Value;

#[derive(Clone)]
pub struct UserService {
    users: ResourceService<User>,
    activities: ResourceService<Activity>,
}

impl UserService {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            users: ResourceService::new(store.clone()),
            activities: ResourceService::new(store),
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<User>> {
        self.users.list(query).await
    }

    pub async fn get(&self, id: &str) -> Result<User> {
        self.users.get(id).await
    }

    pub async fn create(&self, body: Value) -> Result<User> {
        let user = self.users.prepare_create(body)?;
        self.ensure_email_available(&user).await?;
        self.users.insert(&user).await?;
        Ok(user)
    }

    pub async fn replace(&self, id: &str, body: Value) -> Result<User> {
        let user = self.users.prepare_replace(id, body).await?;
        self.ensure_email_available(&user).await?;
        self.users.save(&user).await?;
        Ok(user)
    }

    pub async fn patch(&self, id: &str, body: Value) -> Result<User> {
        let user = self.users.prepare_patch(id, body).await?;
        self.ensure_email_available(&user).await?;
        self.users.save(&user).await?;
        Ok(user)
    }

    /// Delete a user. Their activities and leaderboard rows remain.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.users.delete(id).await
    }

    /// Activities logged by this user.
    pub async fn activities(&self, user_id: &str, query: ListQuery) -> Result<Vec<Activity>> {
        let user = self.users.get(user_id).await?;
        self.activities
            .list(&query.with_filter("user_id", user.id))
            .await
    }

    /// Fail unless no other user already has this user's email.
    ///
    /// Firestore has no unique indexes, so this is a read-then-write check.
    async fn ensure_email_available(&self, user: &User) -> Result<()> {
        let query = StoreQuery::new().filter("email", user.email.clone()).limit(2);
        let holders: Vec<User> = self.users.store().find(User::COLLECTION, &query).await?;

        if holders.iter().any(|holder| holder.id != user.id) {
            tracing::debug!(user_id = %user.id, "Rejected duplicate email");
            return Err(AppError::field(
                "email",
                "user with this email already exists",
            ));
        }
        Ok(())
    }
}
