use crate::document::StoredIndexSet;
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by the index engine.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure reported by the document store.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Port to the search engine's index administration surface.
///
/// The wire protocol lives elsewhere; this core only needs the three
/// administrative primitives below.
#[async_trait]
pub trait IndexEngine: Send + Sync {
    /// Create a physical index. Fails if the engine rejects the request.
    async fn create_index(
        &self,
        name: &str,
        settings: &serde_json::Value,
        mapping: &serde_json::Value,
    ) -> Result<(), EngineError>;

    /// Apply settings/mapping to an index. Idempotent: creates if absent.
    async fn update_index(
        &self,
        name: &str,
        settings: &serde_json::Value,
        mapping: &serde_json::Value,
    ) -> Result<(), EngineError>;

    /// Delete a physical index. Idempotent: deleting an absent index is ok.
    async fn delete_index(&self, name: &str) -> Result<(), EngineError>;
}

/// Port to the document store holding stored index-set records.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(
        &self,
        collection: &str,
        doc_id: &str,
        document: StoredIndexSet,
    ) -> Result<(), StoreError>;

    /// Returns `None` when no document exists for `doc_id`.
    async fn get(&self, collection: &str, doc_id: &str) -> Result<Option<StoredIndexSet>, StoreError>;

    async fn delete(&self, collection: &str, doc_id: &str) -> Result<(), StoreError>;

    async fn exists(&self, collection: &str, doc_id: &str) -> Result<bool, StoreError>;

    async fn list_ids(&self, collection: &str) -> Result<Vec<String>, StoreError>;
}
