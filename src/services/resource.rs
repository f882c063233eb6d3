// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic list/get/create/update/delete over one collection.
//!
//! Entity services wrap a [`ResourceService`] and add their own rules
//! (unique emails, derived activity fields, relationship queries).

use crate::db::{DocumentStore, SortKey, StoreQuery};
use crate::error::{AppError, Result};
use crate::models::{Resource, Writable};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;
use validator::Validate;

const SEARCH_PARAM: &str = "search";
const ORDERING_PARAM: &str = "ordering";
const MAX_ID_LEN: usize = 100;

/// Parsed list parameters: equality filters, search terms and ordering.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filters: Vec<(&'static str, String)>,
    /// Lowercased search terms; every term must match some search field.
    pub search: Vec<String>,
    pub ordering: Vec<SortKey>,
}

impl ListQuery {
    /// Parse raw query parameters against a resource's filter and ordering fields.
    ///
    /// Parameters that are not filters of `R` are ignored, and so are
    /// unknown ordering fields.
    pub fn parse<R: Resource>(params: &HashMap<String, String>) -> Self {
        let filters = R::FILTER_FIELDS
            .iter()
            .filter_map(|field| {
                params
                    .get(*field)
                    .map(|value| value.trim())
                    .filter(|value| !value.is_empty())
                    .map(|value| (*field, value.to_string()))
            })
            .collect();

        // Resources without search fields ignore the parameter.
        let search = params
            .get(SEARCH_PARAM)
            .filter(|_| !R::SEARCH_FIELDS.is_empty())
            .map(|raw| {
                raw.split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|term| !term.is_empty())
                    .map(|term| term.to_lowercase())
                    .collect()
            })
            .unwrap_or_default();

        let ordering = parse_ordering::<R>(params.get(ORDERING_PARAM).map(String::as_str));

        Self {
            filters,
            search,
            ordering,
        }
    }

    /// Default query for `R`: no filters, no search, default ordering.
    pub fn defaults<R: Resource>() -> Self {
        Self {
            ordering: R::DEFAULT_ORDERING.to_vec(),
            ..Self::default()
        }
    }

    /// Force an equality filter, replacing any filter on the same field.
    pub fn with_filter(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.filters.retain(|(f, _)| *f != field);
        self.filters.push((field, value.into()));
        self
    }
}

/// Parse a comma-separated ordering list, `-` prefix meaning descending.
///
/// Unknown fields are skipped. If none remain, the default ordering applies.
fn parse_ordering<R: Resource>(raw: Option<&str>) -> Vec<SortKey> {
    let keys: Vec<SortKey> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let (name, descending) = match part.strip_prefix('-') {
                Some(name) => (name, true),
                None => (part, false),
            };
            let key = R::ORDERING_FIELDS
                .iter()
                .find(|field| **field == name)
                .map(|field| SortKey {
                    field: *field,
                    descending,
                });
            if key.is_none() {
                tracing::debug!(
                    collection = R::COLLECTION,
                    field = name,
                    "Ignored ordering field"
                );
            }
            key
        })
        .collect();

    if keys.is_empty() {
        R::DEFAULT_ORDERING.to_vec()
    } else {
        keys
    }
}

/// Case-insensitive substring search over a record's search fields.
fn matches_search<R: Resource>(record: &R, terms: &[String]) -> bool {
    let Ok(doc) = serde_json::to_value(record) else {
        return false;
    };

    let haystacks: Vec<String> = R::SEARCH_FIELDS
        .iter()
        .filter_map(|field| doc.get(*field).and_then(Value::as_str))
        .map(str::to_lowercase)
        .collect();

    terms
        .iter()
        .all(|term| haystacks.iter().any(|text| text.contains(term.as_str())))
}

/// Check a caller-chosen document key.
pub fn validate_document_id(id: &str) -> Result<()> {
    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if id.is_empty() || id.len() > MAX_ID_LEN || !valid_chars {
        return Err(AppError::field(
            "_id",
            "must be 1-100 characters of letters, digits, '_' or '-'",
        ));
    }
    Ok(())
}

/// Use the requested key, or assign `<prefix>_<uuid>`.
pub fn resolve_id<R: Resource>(requested: Option<&str>) -> Result<String> {
    match requested {
        Some(id) => {
            validate_document_id(id)?;
            Ok(id.to_string())
        }
        None => Ok(format!(
            "{}_{}",
            R::ID_PREFIX,
            uuid::Uuid::new_v4().simple()
        )),
    }
}

/// Decode and validate a request payload.
pub fn decode_payload<P>(body: Value) -> Result<P>
where
    P: DeserializeOwned + Validate,
{
    let payload: P = serde_json::from_value(body)?;
    payload.validate()?;
    Ok(payload)
}

/// Overlay the fields of a partial update onto a stored record.
///
/// `_id` in the patch is ignored; keys are immutable.
pub fn merge_patch<R: Resource>(existing: &R, patch: Value) -> Result<Value> {
    let Value::Object(fields) = patch else {
        return Err(AppError::BadRequest(
            "Partial update body must be a JSON object".to_string(),
        ));
    };

    let mut merged = serde_json::to_value(existing).map_err(|e| AppError::Internal(e.into()))?;
    if let Value::Object(target) = &mut merged {
        for (key, value) in fields {
            if key != "_id" {
                target.insert(key, value);
            }
        }
    }
    Ok(merged)
}

/// CRUD operations over the collection of `R`.
pub struct ResourceService<R> {
    store: DocumentStore,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// List records matching filters and search, in the requested order.
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<R>> {
        let store_query = StoreQuery {
            filters: query.filters.clone(),
            order: query.ordering.clone(),
            limit: None,
        };

        let records: Vec<R> = self.store.find(R::COLLECTION, &store_query).await?;

        tracing::debug!(
            collection = R::COLLECTION,
            filters = ?query.filters,
            search = ?query.search,
            count = records.len(),
            "Listed records"
        );

        if query.search.is_empty() {
            return Ok(records);
        }

        Ok(records
            .into_iter()
            .filter(|record| matches_search(record, &query.search))
            .collect())
    }

    /// Look up a record that may not exist.
    ///
    /// Keys that could never have been stored are reported as missing.
    pub async fn find(&self, id: &str) -> Result<Option<R>> {
        if validate_document_id(id).is_err() {
            return Ok(None);
        }
        self.store.find_one(R::COLLECTION, id).await
    }

    /// Get a record or fail with Not-Found.
    pub async fn get(&self, id: &str) -> Result<R> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", R::KIND, id)))
    }

    /// Store a new record; its key must not be taken.
    pub async fn insert(&self, record: &R) -> Result<()> {
        if self.find(record.id()).await?.is_some() {
            return Err(AppError::field(
                "_id",
                format!("{} with key '{}' already exists", R::KIND, record.id()),
            ));
        }
        self.save(record).await?;
        tracing::info!(collection = R::COLLECTION, id = record.id(), "Created record");
        Ok(())
    }

    /// Create or overwrite a record.
    pub async fn save(&self, record: &R) -> Result<()> {
        self.store.set(R::COLLECTION, record.id(), record).await
    }

    /// Delete a record. Dependents are left untouched.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.get(id).await?;
        self.store.delete_one(R::COLLECTION, id).await?;
        tracing::info!(collection = R::COLLECTION, id, "Deleted record");
        Ok(())
    }
}

impl<R: Writable> ResourceService<R> {
    /// Build and validate a new record without storing it.
    pub fn prepare_create(&self, body: Value) -> Result<R> {
        let payload: R::Payload = decode_payload(body)?;
        let id = resolve_id::<R>(R::requested_id(&payload))?;
        Ok(R::build(id, payload, None, Utc::now()))
    }

    /// Build and validate a full replacement of a stored record.
    pub async fn prepare_replace(&self, id: &str, body: Value) -> Result<R> {
        let existing = self.get(id).await?;
        let payload: R::Payload = decode_payload(body)?;
        Ok(R::build(id.to_string(), payload, Some(&existing), Utc::now()))
    }

    /// Build and validate a partial update of a stored record.
    pub async fn prepare_patch(&self, id: &str, body: Value) -> Result<R> {
        let existing = self.get(id).await?;
        let merged = merge_patch(&existing, body)?;
        let payload: R::Payload = decode_payload(merged)?;
        Ok(R::build(id.to_string(), payload, Some(&existing), Utc::now()))
    }

    pub async fn create(&self, body: Value) -> Result<R> {
        let record = self.prepare_create(body)?;
        self.insert(&record).await?;
        Ok(record)
    }

    pub async fn replace(&self, id: &str, body: Value) -> Result<R> {
        let record = self.prepare_replace(id, body).await?;
        self.save(&record).await?;
        Ok(record)
    }

    pub async fn patch(&self, id: &str, body: Value) -> Result<R> {
        let record = self.prepare_patch(id, body).await?;
        self.save(&record).await?;
        Ok(record)
    }
}
