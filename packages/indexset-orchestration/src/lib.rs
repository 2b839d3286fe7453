/*
 * Indexset Orchestration - Index-Set Lifecycle
 *
 * Sequences the index-set lifecycle against two external collaborators:
 * - Index Engine (physical index create/update/delete)
 * - Document Store (stored index-set records)
 *
 * Architecture:
 * - Port traits for both collaborators (in-memory implementations included)
 * - Lifecycle orchestrator (create / update / delete / reset) with
 *   compensating rollback on the create path
 * - Rebalancing controller (dedicated-index split per collection)
 * - Per-id lock registry (single writer per index-set id)
 */

// Public modules
pub mod config;
pub mod document;
pub mod error;
pub mod locks;
pub mod memory;
pub mod orchestrator;
pub mod ports;
pub mod rebalance;

// Re-exports
pub use config::OrchestratorConfig;
pub use document::StoredIndexSet;
pub use error::{EnginePhase, IndexSetError, Result};
pub use locks::{IdLockGuard, IdLockRegistry};
pub use memory::{InMemoryDocumentStore, InMemoryIndexEngine};
pub use orchestrator::IndexSetOrchestrator;
pub use ports::{DocumentStore, EngineError, IndexEngine, StoreError};
pub use rebalance::RebalanceController;
