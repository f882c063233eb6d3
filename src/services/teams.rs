// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team service: CRUD plus member and activity lookups.

use super::resource::{ListQuery, ResourceService};
use crate::db::DocumentStore;
use crate::error::Result;
use crate::models::{Activity, Team, User};
use serde_json::Value;

#[derive(Clone)]
pub struct TeamService {
    teams: ResourceService<Team>,
    users: ResourceService<User>,
    activities: ResourceService<Activity>,
}

impl TeamService {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            teams: ResourceService::new(store.clone()),
            users: ResourceService::new(store.clone()),
            activities: ResourceService::new(store),
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Team>> {
        self.teams.list(query).await
    }

    pub async fn get(&self, id: &str) -> Result<Team> {
        self.teams.get(id).await
    }

    pub async fn create(&self, body: Value) -> Result<Team> {
        self.teams.create(body).await
    }

    pub async fn replace(&self, id: &str, body: Value) -> Result<Team> {
        self.teams.replace(id, body).await
    }

    pub async fn patch(&self, id: &str, body: Value) -> Result<Team> {
        self.teams.patch(id, body).await
    }

    /// Delete a team. Its users keep their (now dangling) team reference.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.teams.delete(id).await
    }

    /// Users whose team reference is this team.
    pub async fn members(&self, team_id: &str, query: ListQuery) -> Result<Vec<User>> {
        let team = self.teams.get(team_id).await?;
        self.users.list(&query.with_filter("team_id", team.id)).await
    }

    /// Activities whose (copied) team reference is this team.
    pub async fn activities(&self, team_id: &str, query: ListQuery) -> Result<Vec<Activity>> {
        let team = self.teams.get(team_id).await?;
        self.activities
            .list(&query.with_filter("team_id", team.id))
            .await
    }
}
