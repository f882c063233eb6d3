// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend-agnostic document store handle.

use super::{FirestoreStore, MemoryStore, StoreQuery};
use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};

/// Handle to the document store. Cheap to clone.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreStore),
    Memory(MemoryStore),
}

impl DocumentStore {
    /// Connect to the backend selected by configuration.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.store_backend {
            StoreBackend::Firestore => {
                let store = FirestoreStore::new(&config.gcp_project_id).await?;
                Ok(Self {
                    backend: Backend::Firestore(store),
                })
            }
            StoreBackend::Memory => Ok(Self::memory()),
        }
    }

    /// Create an empty in-process store.
    pub fn memory() -> Self {
        tracing::info!("Using in-memory document store");
        Self {
            backend: Backend::Memory(MemoryStore::default()),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            Backend::Firestore(_) => "firestore",
            Backend::Memory(_) => "memory",
        }
    }

    /// Find documents matching `query`.
    pub async fn find<T>(
        &self,
        collection: &'static str,
        query: &StoreQuery,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        match &self.backend {
            Backend::Firestore(store) => store.find(collection, query).await,
            Backend::Memory(store) => store.find(collection, query),
        }
    }

    /// Get one document by key.
    pub async fn find_one<T>(
        &self,
        collection: &'static str,
        id: &str,
    ) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        match &self.backend {
            Backend::Firestore(store) => store.find_one(collection, id).await,
            Backend::Memory(store) => store.find_one(collection, id),
        }
    }

    /// Create or replace a document.
    pub async fn set<T>(
        &self,
        collection: &'static str,
        id: &str,
        doc: &T,
    ) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(store) => store.set(collection, id, doc).await,
            Backend::Memory(store) => store.set(collection, id, doc),
        }
    }

    /// Write many documents, keyed by `id_of`.
    pub async fn insert_many<T, F>(
        &self,
        collection: &'static str,
        docs: &[T],
        id_of: F,
    ) -> Result<usize, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: Fn(&T) -> String,
    {
        match &self.backend {
            Backend::Firestore(store) => store.insert_many(collection, docs, id_of).await?,
            Backend::Memory(store) => store.insert_many(collection, docs, id_of)?,
        }
        Ok(docs.len())
    }

    /// Delete one document. Deleting a missing key is not an error.
    pub async fn delete_one(&self, collection: &'static str, id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.delete_one(collection, id).await,
            Backend::Memory(store) => {
                store.delete_one(collection, id);
                Ok(())
            }
        }
    }

    /// Delete every document in a collection, returning how many were removed.
    pub async fn delete_all(&self, collection: &'static str) -> Result<usize, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.delete_all(collection).await,
            Backend::Memory(store) => Ok(store.delete_all(collection)),
        }
    }
}
