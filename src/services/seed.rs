// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sample dataset generation.
//!
//! Builds two teams of superheroes, their workouts and a month of activity,
//! then the leaderboard snapshot. Writing a dataset wipes every collection
//! first.

use super::leaderboard::derive_leaderboard;
use crate::db::{collections, DocumentStore};
use crate::error::{AppError, Result};
use crate::models::{Activity, LeaderboardEntry, Team, User, Workout};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

pub const ACTIVITY_COUNT: usize = 100;

struct Hero {
    name: &'static str,
    alias: &'static str,
    email: &'static str,
    team_id: &'static str,
}

const fn hero(
    name: &'static str,
    alias: &'static str,
    email: &'static str,
    team_id: &'static str,
) -> Hero {
    Hero {
        name,
        alias,
        email,
        team_id,
    }
}

const TEAMS: [(&str, &str, &str); 2] = [
    ("team_marvel", "Team Marvel", "Earth's Mightiest Heroes"),
    ("team_dc", "Team DC", "Justice League United"),
];

const ROSTER: [Hero; 12] = [
    hero("Tony Stark", "Iron Man", "ironman@marvel.com", "team_marvel"),
    hero("Steve Rogers", "Captain America", "cap@marvel.com", "team_marvel"),
    hero("Bruce Banner", "Hulk", "hulk@marvel.com", "team_marvel"),
    hero("Natasha Romanoff", "Black Widow", "blackwidow@marvel.com", "team_marvel"),
    hero("Thor Odinson", "Thor", "thor@marvel.com", "team_marvel"),
    hero("Peter Parker", "Spider-Man", "spidey@marvel.com", "team_marvel"),
    hero("Clark Kent", "Superman", "superman@dc.com", "team_dc"),
    hero("Bruce Wayne", "Batman", "batman@dc.com", "team_dc"),
    hero("Diana Prince", "Wonder Woman", "wonderwoman@dc.com", "team_dc"),
    hero("Barry Allen", "Flash", "flash@dc.com", "team_dc"),
    hero("Arthur Curry", "Aquaman", "aquaman@dc.com", "team_dc"),
    hero("Hal Jordan", "Green Lantern", "greenlantern@dc.com", "team_dc"),
];

struct CatalogEntry {
    name: &'static str,
    icon: &'static str,
    unit: &'static str,
    points_per_unit: u32,
    phrases: [&'static str; 4],
}

const CATALOG: [CatalogEntry; 7] = [
    CatalogEntry {
        name: "Running",
        icon: "🏃",
        unit: "km",
        points_per_unit: 10,
        phrases: ["Morning run in the park", "Evening jog", "Sprint training", "Marathon prep"],
    },
    CatalogEntry {
        name: "Cycling",
        icon: "🚴",
        unit: "km",
        points_per_unit: 5,
        phrases: ["Bike to work", "Mountain biking", "Road cycling", "City tour"],
    },
    CatalogEntry {
        name: "Swimming",
        icon: "🏊",
        unit: "laps",
        points_per_unit: 15,
        phrases: ["Pool training", "Open water swim", "Lap practice", "Endurance swim"],
    },
    CatalogEntry {
        name: "Push-ups",
        icon: "💪",
        unit: "reps",
        points_per_unit: 1,
        phrases: ["Daily routine", "Chest workout", "Upper body training", "Challenge completed"],
    },
    CatalogEntry {
        name: "Weightlifting",
        icon: "🏋️",
        unit: "kg",
        points_per_unit: 2,
        phrases: ["Leg day", "Arm workout", "Back exercises", "Full body workout"],
    },
    CatalogEntry {
        name: "Yoga",
        icon: "🧘",
        unit: "minutes",
        points_per_unit: 5,
        phrases: ["Morning stretch", "Meditation session", "Flexibility training", "Relaxation"],
    },
    CatalogEntry {
        name: "Boxing",
        icon: "🥊",
        unit: "rounds",
        points_per_unit: 20,
        phrases: ["Training session", "Sparring practice", "Heavy bag workout", "Speed training"],
    },
];

/// A generated dataset, ready to be written.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub teams: Vec<Team>,
    pub users: Vec<User>,
    pub workouts: Vec<Workout>,
    pub activities: Vec<Activity>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Number of records written per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub teams: usize,
    pub users: usize,
    pub workouts: usize,
    pub activities: usize,
    pub leaderboard: usize,
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Teams: {}", self.teams)?;
        writeln!(f, "Users: {}", self.users)?;
        writeln!(f, "Workouts: {}", self.workouts)?;
        writeln!(f, "Activities: {}", self.activities)?;
        write!(f, "Leaderboard entries: {}", self.leaderboard)
    }
}

fn avatar_url(alias: &str) -> String {
    format!(
        "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
        alias.replace(' ', "%20")
    )
}

/// Generate a complete dataset from `rng`, relative to `now`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> SeedData {
    let mut teams: Vec<Team> = TEAMS
        .iter()
        .map(|(id, name, description)| Team {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: now,
            member_count: 0,
        })
        .collect();

    let users: Vec<User> = ROSTER
        .iter()
        .enumerate()
        .map(|(index, hero)| User {
            id: format!("user_{}", index + 1),
            name: hero.name.to_string(),
            alias: hero.alias.to_string(),
            email: hero.email.to_string(),
            team_id: hero.team_id.to_string(),
            total_points: rng.gen_range(500..=2000),
            activities_completed: rng.gen_range(10..=50),
            joined_at: now - Duration::days(rng.gen_range(1..=90)),
            profile_image: Some(avatar_url(hero.alias)),
        })
        .collect();

    for team in &mut teams {
        team.member_count = users.iter().filter(|u| u.team_id == team.id).count() as u32;
    }

    let workouts: Vec<Workout> = CATALOG
        .iter()
        .enumerate()
        .map(|(index, entry)| Workout {
            id: format!("workout_{}", index + 1),
            name: entry.name.to_string(),
            icon: entry.icon.to_string(),
            unit: entry.unit.to_string(),
            points_per_unit: entry.points_per_unit,
            description: format!("{} exercise", entry.name),
            created_at: now,
        })
        .collect();

    let activities: Vec<Activity> = (1..=ACTIVITY_COUNT)
        .map(|n| {
            let user = &users[rng.gen_range(0..users.len())];
            let workout_index = rng.gen_range(0..workouts.len());
            let workout = &workouts[workout_index];
            let quantity = rng.gen_range(1..=50);
            let phrases = &CATALOG[workout_index].phrases;
            let description = phrases[rng.gen_range(0..phrases.len())].to_string();
            let completed_at = now
                - Duration::days(rng.gen_range(0..30))
                - Duration::hours(rng.gen_range(0..24));

            Activity::snapshot(
                format!("activity_{}", n),
                user,
                workout,
                description,
                quantity,
                completed_at,
            )
        })
        .collect();

    let leaderboard = derive_leaderboard(&teams, &users, now);

    SeedData {
        teams,
        users,
        workouts,
        activities,
        leaderboard,
    }
}

/// Writes generated datasets to a store.
pub struct Seeder {
    store: DocumentStore,
}

impl Seeder {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Wipe the store and write a fresh random dataset.
    pub async fn run(&self) -> Result<SeedSummary> {
        let mut rng = StdRng::from_entropy();
        self.write(generate(&mut rng, Utc::now())).await
    }

    /// Like [`Seeder::run`], with reproducible output for a given seed.
    pub async fn run_with_rng_seed(&self, seed: u64) -> Result<SeedSummary> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.write(generate(&mut rng, Utc::now())).await
    }

    /// Wipe every collection, then write `data` in dependency order.
    ///
    /// Not transactional: a store failure part way leaves a partial dataset.
    pub async fn write(&self, data: SeedData) -> Result<SeedSummary> {
        ensure_unique_emails(&data.users)?;

        tracing::warn!(backend = self.store.backend_name(), "Clearing existing data");
        for collection in collections::ALL {
            let removed = self.store.delete_all(collection).await?;
            tracing::debug!(collection, removed, "Cleared collection");
        }

        let summary = SeedSummary {
            teams: self
                .store
                .insert_many(collections::TEAMS, &data.teams, |t| t.id.clone())
                .await?,
            users: self
                .store
                .insert_many(collections::USERS, &data.users, |u| u.id.clone())
                .await?,
            workouts: self
                .store
                .insert_many(collections::WORKOUTS, &data.workouts, |w| w.id.clone())
                .await?,
            activities: self
                .store
                .insert_many(collections::ACTIVITIES, &data.activities, |a| a.id.clone())
                .await?,
            leaderboard: self
                .store
                .insert_many(collections::LEADERBOARD, &data.leaderboard, |e| e.id.clone())
                .await?,
        };

        tracing::info!(
            teams = summary.teams,
            users = summary.users,
            workouts = summary.workouts,
            activities = summary.activities,
            leaderboard = summary.leaderboard,
            "Database population completed"
        );
        Ok(summary)
    }
}

fn ensure_unique_emails(users: &[User]) -> Result<()> {
    let mut seen = HashSet::new();
    for user in users {
        if !seen.insert(user.email.as_str()) {
            return Err(AppError::field(
                "email",
                format!("duplicate seed email '{}'", user.email),
            ));
        }
    }
    Ok(())
}
