//! Database layer (document store).

pub mod firestore;
pub mod memory;
pub mod store;

pub use self::firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use store::DocumentStore;

/// Collection names as constants.
pub mod collections {
    pub const TEAMS: &str = "teams";
    pub const USERS: &str = "users";
    pub const WORKOUTS: &str = "workouts";
    pub const ACTIVITIES: &str = "activities";
    /// Leaderboard snapshot rows (individual and team)
    pub const LEADERBOARD: &str = "leaderboard";

    /// Every collection, in seed write order.
    pub const ALL: [&str; 5] = [TEAMS, USERS, WORKOUTS, ACTIVITIES, LEADERBOARD];
}

/// One ordering key of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub descending: bool,
}

impl SortKey {
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

/// Equality filters, ordering and limit understood by every backend.
#[derive(Debug, Clone, Default)]
pub struct StoreQuery {
    pub filters: Vec<(&'static str, String)>,
    pub order: Vec<SortKey>,
    pub limit: Option<u32>,
}

impl StoreQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.filters.push((field, value.into()));
        self
    }

    pub fn order_by(mut self, keys: &[SortKey]) -> Self {
        self.order.extend_from_slice(keys);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
