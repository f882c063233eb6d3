// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store.
//!
//! Documents are kept as JSON values per collection, keyed by document id.
//! Queries evaluate equality filters and ordering directly on the JSON, so
//! behavior matches the Firestore backend for the value types we store.

use super::{SortKey, StoreQuery};
use crate::error::AppError;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Memory-backed collections, shared across clones.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<&'static str, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn find<T>(&self, collection: &'static str, query: &StoreQuery) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let mut matched: Vec<Value> = match self.collections.get(collection) {
            Some(docs) => docs
                .values()
                .filter(|doc| matches_filters(doc, &query.filters))
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        // Stable sort: ties keep key order.
        matched.sort_by(|a, b| compare_docs(a, b, &query.order));

        if let Some(limit) = query.limit {
            matched.truncate(limit as usize);
        }

        matched.into_iter().map(decode).collect()
    }

    pub fn find_one<T>(&self, collection: &'static str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let doc = self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id).cloned());
        doc.map(decode).transpose()
    }

    pub fn set<T>(&self, collection: &'static str, id: &str, doc: &T) -> Result<(), AppError>
    where
        T: Serialize,
    {
        let value = encode(doc)?;
        self.collections
            .entry(collection)
            .or_default()
            .insert(id.to_string(), value);
        Ok(())
    }

    pub fn insert_many<T, F>(
        &self,
        collection: &'static str,
        docs: &[T],
        id_of: F,
    ) -> Result<(), AppError>
    where
        T: Serialize,
        F: Fn(&T) -> String,
    {
        let encoded = docs
            .iter()
            .map(|doc| Ok((id_of(doc), encode(doc)?)))
            .collect::<Result<Vec<_>, AppError>>()?;

        self.collections
            .entry(collection)
            .or_default()
            .extend(encoded);
        Ok(())
    }

    pub fn delete_one(&self, collection: &'static str, id: &str) {
        if let Some(mut docs) = self.collections.get_mut(collection) {
            docs.remove(id);
        }
    }

    pub fn delete_all(&self, collection: &'static str) -> usize {
        self.collections
            .remove(collection)
            .map(|(_, docs)| docs.len())
            .unwrap_or(0)
    }
}

fn encode<T: Serialize>(doc: &T) -> Result<Value, AppError> {
    serde_json::to_value(doc)
        .map_err(|e| AppError::Database(format!("Failed to encode document: {}", e)))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Database(format!("Failed to decode document: {}", e)))
}

fn matches_filters(doc: &Value, filters: &[(&'static str, String)]) -> bool {
    filters.iter().all(|(field, expected)| match doc.get(*field) {
        Some(Value::String(actual)) => actual == expected,
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == *expected,
    })
}

fn compare_docs(a: &Value, b: &Value, order: &[SortKey]) -> Ordering {
    for key in order {
        let ordering = compare_values(a.get(key.field), b.get(key.field));
        let ordering = if key.descending {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Missing and null sort first, then numbers, then strings.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn class(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => {
                    let x = x.as_f64().unwrap_or(f64::NAN);
                    let y = y.as_f64().unwrap_or(f64::NAN);
                    x.total_cmp(&y)
                }
            }
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => class(a).cmp(&class(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Doc {
        name: String,
        team: String,
        points: u64,
    }

    fn doc(name: &str, team: &str, points: u64) -> Doc {
        Doc {
            name: name.to_string(),
            team: team.to_string(),
            points,
        }
    }

    fn seeded() -> MemoryStore {
        let store = MemoryStore::default();
        store
            .insert_many(
                "docs",
                &[
                    doc("a", "red", 5),
                    doc("b", "blue", 20),
                    doc("c", "red", 100),
                    doc("d", "red", 20),
                ],
                |d| d.name.clone(),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_filter_and_order() {
        let store = seeded();
        let query = StoreQuery::new()
            .filter("team", "red")
            .order_by(&[SortKey::desc("points")]);

        let docs: Vec<Doc> = store.find("docs", &query).unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["c", "d", "a"]);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let store = seeded();
        let query = StoreQuery::new().order_by(&[SortKey::asc("points"), SortKey::desc("name")]);

        let docs: Vec<Doc> = store.find("docs", &query).unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a", "d", "b", "c"]);
    }

    #[test]
    fn test_limit_applies_after_sorting() {
        let store = seeded();
        let query = StoreQuery::new()
            .order_by(&[SortKey::desc("points")])
            .limit(2);

        let docs: Vec<Doc> = store.find("docs", &query).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].name, "c");
    }

    #[test]
    fn test_set_get_delete() {
        let store = MemoryStore::default();
        store.set("docs", "x", &doc("x", "red", 1)).unwrap();

        let found: Option<Doc> = store.find_one("docs", "x").unwrap();
        assert_eq!(found, Some(doc("x", "red", 1)));

        store.delete_one("docs", "x");
        let gone: Option<Doc> = store.find_one("docs", "x").unwrap();
        assert!(gone.is_none());
    }

    #[test]
    fn test_delete_all_counts() {
        let store = seeded();
        assert_eq!(store.delete_all("docs"), 4);
        assert_eq!(store.delete_all("docs"), 0);
        assert_eq!(store.delete_all("missing"), 0);
    }

    #[test]
    fn test_missing_values_sort_first() {
        assert_eq!(compare_values(None, Some(&json!("a"))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(2)), Some(&json!(10))), Ordering::Less);
    }
}
