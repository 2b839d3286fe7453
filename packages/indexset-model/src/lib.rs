/*
 * Indexset Model - Domain Layer
 *
 * Pure domain types and functions for index-set management:
 * - Index-set definitions (concept groups, index specs)
 * - Deterministic physical index naming
 * - Physical index planning
 * - Validation checks
 * - Pruned client-facing projection
 * - Stored-payload codec (JSON -> zstd -> base64)
 *
 * Everything in this crate is side-effect free; the orchestration crate
 * sequences these pieces against the engine and document store ports.
 */

// Public modules
pub mod codec;
pub mod concept;
pub mod error;
pub mod naming;
pub mod plan;
pub mod projection;
pub mod set;
pub mod validate;

// Re-exports
pub use codec::{decode_payload, encode_payload};
pub use concept::ConceptType;
pub use error::{CodecError, RebalanceError, ValidationError};
pub use naming::derive_index_name;
pub use plan::{physical_plan, PhysicalIndex};
pub use projection::{prune, PrunedIndexSet};
pub use set::{ConceptIndexGroup, IndexSet, IndexSpec};
pub use validate::{check_id, check_id_and_name, check_index_config};
