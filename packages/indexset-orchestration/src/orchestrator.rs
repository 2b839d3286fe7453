use crate::config::OrchestratorConfig;
use crate::document::StoredIndexSet;
use crate::error::{EnginePhase, IndexSetError, Result};
use crate::locks::{IdLockGuard, IdLockRegistry};
use crate::ports::{DocumentStore, EngineError, IndexEngine};
use indexset_model::{
    check_id, check_id_and_name, check_index_config, physical_plan, IndexSet, PhysicalIndex,
    PrunedIndexSet,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Sequences validation, physical index operations, and document persistence
/// for the index-set lifecycle.
///
/// Stateless between calls: all state lives behind the [`DocumentStore`]
/// port. Mutations of the same index-set id are serialized through the
/// per-id lock registry; different ids proceed in parallel.
pub struct IndexSetOrchestrator {
    engine: Arc<dyn IndexEngine>,
    store: Arc<dyn DocumentStore>,
    config: OrchestratorConfig,
    locks: IdLockRegistry,
}

impl IndexSetOrchestrator {
    pub fn new(
        engine: Arc<dyn IndexEngine>,
        store: Arc<dyn DocumentStore>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            engine,
            store,
            config,
            locks: IdLockRegistry::new(),
        }
    }

    /// Create an index set: validate, create every planned physical index in
    /// order, then persist the stored document.
    ///
    /// All-or-nothing from the caller's perspective: any creation or
    /// persistence failure triggers a best-effort delete sweep of the full
    /// plan before the error is surfaced.
    pub async fn create(&self, set: IndexSet) -> Result<()> {
        let _guard = self.locks.acquire(set.id).await;
        let doc_id = set.id.to_string();

        if self.store.exists(&self.config.collection_key, &doc_id).await? {
            return Err(IndexSetError::conflict(format!(
                "index-set id: {} already exists",
                set.id
            )));
        }
        check_id_and_name(&set)?;
        check_id(&set)?;
        check_index_config(&set)?;
        let plan = physical_plan(&set);

        info!(
            "Creating index set {} ({}) with {} physical indices",
            set.id,
            set.name,
            plan.len()
        );

        for entry in &plan {
            if let Err(err) = self
                .engine
                .create_index(&entry.physical_name, &entry.settings, &entry.mapping)
                .await
            {
                error!(
                    "Index creation failed for {}: {}; sweeping {} planned indices",
                    entry.physical_name,
                    err,
                    plan.len()
                );
                self.sweep_indices(&plan).await;
                return Err(IndexSetError::engine(
                    EnginePhase::IndexCreation,
                    format!("failed creating index {}", entry.physical_name),
                    err,
                ));
            }
        }

        let doc = StoredIndexSet::from_definition(&set)?;
        if let Err(err) = self.store.put(&self.config.collection_key, &doc_id, doc).await {
            error!(
                "Persisting index set {} failed: {}; sweeping {} planned indices",
                set.id,
                err,
                plan.len()
            );
            self.sweep_indices(&plan).await;
            return Err(IndexSetError::engine(
                EnginePhase::DocumentIndexing,
                format!("failed persisting index-set {}", set.id),
                EngineError::new(err.message),
            ));
        }

        info!("Created index set {}", set.id);
        Ok(())
    }

    /// Update an index set: apply settings/mapping to every planned index
    /// (idempotent upsert per index), then persist the stored document.
    ///
    /// Unlike create there is no rollback: a mid-list apply failure leaves
    /// already-applied changes in place and propagates immediately. The
    /// caller re-invokes the operation to converge.
    pub async fn update(&self, set: IndexSet) -> Result<()> {
        let _guard = self.locks.acquire(set.id).await;
        self.update_unlocked(&set).await
    }

    /// Update body, shared with the rebalancing controller which already
    /// holds the id lock.
    pub(crate) async fn update_unlocked(&self, set: &IndexSet) -> Result<()> {
        check_id(set)?;
        check_index_config(set)?;
        let plan = physical_plan(set);

        info!(
            "Updating index set {} across {} physical indices",
            set.id,
            plan.len()
        );

        for entry in &plan {
            self.engine
                .update_index(&entry.physical_name, &entry.settings, &entry.mapping)
                .await
                .map_err(|err| {
                    IndexSetError::engine(
                        EnginePhase::IndexCreation,
                        format!("failed applying index {}", entry.physical_name),
                        err,
                    )
                })?;
        }

        let doc = StoredIndexSet::from_definition(set)?;
        self.store
            .put(&self.config.collection_key, &set.id.to_string(), doc)
            .await
            .map_err(|err| {
                IndexSetError::engine(
                    EnginePhase::DocumentIndexing,
                    format!("failed persisting index-set {}", set.id),
                    EngineError::new(err.message),
                )
            })?;

        Ok(())
    }

    /// Delete an index set: every physical index named by the stored
    /// definition (best-effort per index), then the stored document.
    ///
    /// Indices-then-document ordering; an interruption between the two steps
    /// leaves a document referencing deleted indices, recoverable by
    /// re-running delete.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let _guard = self.locks.acquire(id).await;
        let doc_id = id.to_string();

        let doc = self
            .store
            .get(&self.config.collection_key, &doc_id)
            .await?
            .ok_or_else(|| IndexSetError::not_found(format!("index-set id: {}", id)))?;

        // Physical names are recomputed from the stored definition, never
        // read from a cache.
        let set = doc.decode_definition()?;
        let plan = physical_plan(&set);

        info!(
            "Deleting index set {} and {} physical indices",
            id,
            plan.len()
        );
        self.sweep_indices(&plan).await;

        self.store.delete(&self.config.collection_key, &doc_id).await?;
        info!("Deleted index set {}", id);
        Ok(())
    }

    /// Retrieve the pruned projection for an index set.
    pub async fn get(&self, id: i64) -> Result<PrunedIndexSet> {
        let doc = self
            .store
            .get(&self.config.collection_key, &id.to_string())
            .await?
            .ok_or_else(|| IndexSetError::not_found(format!("index-set id: {}", id)))?;
        doc.decode_pruned()
    }

    /// Enumerate stored index-set ids.
    pub async fn list_ids(&self) -> Result<Vec<i64>> {
        let raw = self.store.list_ids(&self.config.collection_key).await?;
        let mut ids = Vec::with_capacity(raw.len());
        for id in raw {
            ids.push(id.parse::<i64>().map_err(|_| {
                IndexSetError::Serialization(format!("non-integer stored index-set id: {}", id))
            })?);
        }
        Ok(ids)
    }

    /// Retrieve every stored set's pruned projection.
    pub async fn list(&self) -> Result<Vec<PrunedIndexSet>> {
        let mut sets = Vec::new();
        for id in self.list_ids().await? {
            sets.push(self.get(id).await?);
        }
        Ok(sets)
    }

    /// Delete every stored index set, sequentially. Not transactional across
    /// ids: a failure partway leaves a reset-in-progress state and the
    /// caller re-invokes to converge.
    pub async fn reset(&self) -> Result<()> {
        let ids = self.list_ids().await?;
        info!("Resetting {} index sets", ids.len());
        for id in ids {
            self.delete(id).await?;
        }
        Ok(())
    }

    /// Best-effort delete sweep over a plan. Individual delete failures are
    /// logged and ignored so cleanup of the remaining indices proceeds;
    /// deleting a never-created index is a harmless no-op.
    async fn sweep_indices(&self, plan: &[PhysicalIndex]) {
        for entry in plan {
            if let Err(err) = self.engine.delete_index(&entry.physical_name).await {
                warn!(
                    "Ignoring delete failure for {} during sweep: {}",
                    entry.physical_name, err
                );
            }
        }
    }

    pub(crate) async fn acquire_id_lock(&self, id: i64) -> IdLockGuard<'_> {
        self.locks.acquire(id).await
    }

    /// Load the complete stored definition. Read-only, no lock taken.
    pub(crate) async fn load_definition(&self, id: i64) -> Result<IndexSet> {
        let doc = self
            .store
            .get(&self.config.collection_key, &id.to_string())
            .await?
            .ok_or_else(|| IndexSetError::not_found(format!("index-set id: {}", id)))?;
        doc.decode_definition()
    }
}
