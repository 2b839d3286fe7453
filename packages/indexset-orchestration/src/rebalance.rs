use crate::error::{IndexSetError, Result};
use crate::orchestrator::IndexSetOrchestrator;
use std::sync::Arc;
use tracing::info;

/// Mutates the granule concept's index layout and rebalancing-collection
/// set, delegating the apply step to the orchestrator's generic update path.
///
/// Both operations run under the same per-id lock as the lifecycle
/// operations, so the load -> mutate -> persist pipeline cannot interleave
/// with a concurrent writer for the same id.
pub struct RebalanceController {
    orchestrator: Arc<IndexSetOrchestrator>,
}

impl RebalanceController {
    pub fn new(orchestrator: Arc<IndexSetOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Transition a collection to `rebalancing`: mark it in the granule
    /// group's rebalancing set and split out a dedicated physical index for
    /// it. The dedicated index is created by the update path as a side
    /// effect of the layout change.
    pub async fn start_rebalancing(&self, id: i64, collection_id: &str) -> Result<()> {
        let _guard = self.orchestrator.acquire_id_lock(id).await;

        let set = self.orchestrator.load_definition(id).await?;
        let next = set
            .start_rebalancing(collection_id)
            .map_err(|err| IndexSetError::bad_request(err.to_string()))?;

        info!(
            "Starting rebalancing of collection {} in index set {}",
            collection_id, id
        );
        self.orchestrator.update_unlocked(&next).await
    }

    /// Transition a collection to `settled`: clear the in-progress marker.
    /// The dedicated index created at start stays part of the permanent
    /// layout.
    pub async fn finalize_rebalancing(&self, id: i64, collection_id: &str) -> Result<()> {
        let _guard = self.orchestrator.acquire_id_lock(id).await;

        let set = self.orchestrator.load_definition(id).await?;
        let next = set
            .finalize_rebalancing(collection_id)
            .map_err(|err| IndexSetError::bad_request(err.to_string()))?;

        info!(
            "Finalizing rebalancing of collection {} in index set {}",
            collection_id, id
        );
        self.orchestrator.update_unlocked(&next).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrchestratorConfig;
    use crate::memory::{InMemoryDocumentStore, InMemoryIndexEngine};
    use indexset_model::{ConceptIndexGroup, ConceptType, IndexSet, IndexSpec};
    use serde_json::json;

    fn fixture() -> (
        Arc<InMemoryIndexEngine>,
        Arc<IndexSetOrchestrator>,
        RebalanceController,
    ) {
        let engine = Arc::new(InMemoryIndexEngine::new());
        let store = Arc::new(InMemoryDocumentStore::new());
        let orchestrator = Arc::new(IndexSetOrchestrator::new(
            engine.clone(),
            store,
            OrchestratorConfig::default(),
        ));
        let controller = RebalanceController::new(orchestrator.clone());
        (engine, orchestrator, controller)
    }

    fn granule_set() -> IndexSet {
        IndexSet::new(7, "prod").with_concept(
            ConceptType::Granule,
            ConceptIndexGroup::new(
                json!({"dynamic": false}),
                vec![IndexSpec::new("small_collections", json!({"shards": 5}))],
            )
            .with_individual_settings(json!({"shards": 10})),
        )
    }

    #[tokio::test]
    async fn test_start_creates_dedicated_index() {
        let (engine, orchestrator, controller) = fixture();
        orchestrator.create(granule_set()).await.unwrap();

        controller.start_rebalancing(7, "C123").await.unwrap();

        assert!(engine.has_index("7_c123"));
        let pruned = orchestrator.get(7).await.unwrap();
        assert_eq!(pruned.concepts[&ConceptType::Granule]["C123"], "7_c123");

        let stored = orchestrator.load_definition(7).await.unwrap();
        let group = stored.granule_group().unwrap();
        assert!(group.rebalancing_collections.contains("C123"));
        assert_eq!(group.indexes[1].settings, json!({"shards": 10}));
    }

    #[tokio::test]
    async fn test_start_twice_fails_and_leaves_state_unchanged() {
        let (_engine, orchestrator, controller) = fixture();
        orchestrator.create(granule_set()).await.unwrap();

        controller.start_rebalancing(7, "C123").await.unwrap();
        let before = orchestrator.load_definition(7).await.unwrap();

        let err = controller.start_rebalancing(7, "C123").await.unwrap_err();
        assert!(matches!(err, IndexSetError::BadRequest(_)));

        let after = orchestrator.load_definition(7).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_finalize_clears_marker_and_keeps_index() {
        let (engine, orchestrator, controller) = fixture();
        orchestrator.create(granule_set()).await.unwrap();

        controller.start_rebalancing(7, "C123").await.unwrap();
        controller.finalize_rebalancing(7, "C123").await.unwrap();

        let stored = orchestrator.load_definition(7).await.unwrap();
        let group = stored.granule_group().unwrap();
        assert!(group.rebalancing_collections.is_empty());
        assert!(group.indexes.iter().any(|spec| spec.name == "C123"));
        assert!(engine.has_index("7_c123"));
    }

    #[tokio::test]
    async fn test_finalize_never_started_issues_no_update() {
        let (engine, orchestrator, controller) = fixture();
        orchestrator.create(granule_set()).await.unwrap();
        let baseline = engine.op_count();

        let err = controller.finalize_rebalancing(7, "C123").await.unwrap_err();
        assert!(matches!(err, IndexSetError::BadRequest(_)));
        assert_eq!(engine.op_count(), baseline);
    }

    #[tokio::test]
    async fn test_start_on_missing_set_is_not_found() {
        let (_engine, _orchestrator, controller) = fixture();
        let err = controller.start_rebalancing(404, "C123").await.unwrap_err();
        assert!(matches!(err, IndexSetError::NotFound(_)));
    }
}
