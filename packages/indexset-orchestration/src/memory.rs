use crate::document::StoredIndexSet;
use crate::ports::{DocumentStore, EngineError, IndexEngine, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory index engine for tests and local runs, with failure injection.
#[derive(Default)]
pub struct InMemoryIndexEngine {
    indices: DashMap<String, (serde_json::Value, serde_json::Value)>,
    fail_create_on: Mutex<Option<String>>,
    fail_update_on: Mutex<Option<String>>,
    ops: Mutex<Vec<String>>,
}

impl InMemoryIndexEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next create of `name` fail.
    pub fn fail_create_on(&self, name: impl Into<String>) {
        *self.fail_create_on.lock().unwrap() = Some(name.into());
    }

    /// Make the next update of `name` fail.
    pub fn fail_update_on(&self, name: impl Into<String>) {
        *self.fail_update_on.lock().unwrap() = Some(name.into());
    }

    pub fn has_index(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    pub fn index_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.indices.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Every engine call recorded in order, e.g. `"create 3_coll1"`.
    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }

    pub fn op_count(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    fn record(&self, op: &str, name: &str) {
        self.ops.lock().unwrap().push(format!("{} {}", op, name));
    }
}

#[async_trait]
impl IndexEngine for InMemoryIndexEngine {
    async fn create_index(
        &self,
        name: &str,
        settings: &serde_json::Value,
        mapping: &serde_json::Value,
    ) -> Result<(), EngineError> {
        self.record("create", name);
        if self.fail_create_on.lock().unwrap().as_deref() == Some(name) {
            return Err(EngineError::new(format!("injected create failure: {}", name)));
        }
        self.indices
            .insert(name.to_string(), (settings.clone(), mapping.clone()));
        Ok(())
    }

    async fn update_index(
        &self,
        name: &str,
        settings: &serde_json::Value,
        mapping: &serde_json::Value,
    ) -> Result<(), EngineError> {
        self.record("update", name);
        if self.fail_update_on.lock().unwrap().as_deref() == Some(name) {
            return Err(EngineError::new(format!("injected update failure: {}", name)));
        }
        // Upsert: creates if absent.
        self.indices
            .insert(name.to_string(), (settings.clone(), mapping.clone()));
        Ok(())
    }

    async fn delete_index(&self, name: &str) -> Result<(), EngineError> {
        self.record("delete", name);
        // Idempotent: deleting an absent index is not an error.
        self.indices.remove(name);
        Ok(())
    }
}

/// In-memory document store for tests and local runs.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    docs: DashMap<String, StoredIndexSet>,
    fail_next_put: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next put fail.
    pub fn fail_next_put(&self) {
        self.fail_next_put.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn key(collection: &str, doc_id: &str) -> String {
        format!("{}/{}", collection, doc_id)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(
        &self,
        collection: &str,
        doc_id: &str,
        document: StoredIndexSet,
    ) -> Result<(), StoreError> {
        if self.fail_next_put.swap(false, Ordering::SeqCst) {
            return Err(StoreError::new(format!("injected put failure: {}", doc_id)));
        }
        self.docs.insert(Self::key(collection, doc_id), document);
        Ok(())
    }

    async fn get(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<StoredIndexSet>, StoreError> {
        Ok(self
            .docs
            .get(&Self::key(collection, doc_id))
            .map(|doc| doc.clone()))
    }

    async fn delete(&self, collection: &str, doc_id: &str) -> Result<(), StoreError> {
        self.docs.remove(&Self::key(collection, doc_id));
        Ok(())
    }

    async fn exists(&self, collection: &str, doc_id: &str) -> Result<bool, StoreError> {
        Ok(self.docs.contains_key(&Self::key(collection, doc_id)))
    }

    async fn list_ids(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        let prefix = format!("{}/", collection);
        let mut ids: Vec<String> = self
            .docs
            .iter()
            .filter_map(|e| e.key().strip_prefix(&prefix).map(str::to_string))
            .collect();
        ids.sort();
        Ok(ids)
    }
}
