use crate::concept::ConceptType;
use crate::error::RebalanceError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single logical index inside a concept group.
///
/// `name` is the logical suffix; the physical name is derived from it and the
/// owning index set's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSpec {
    pub name: String,
    /// Opaque engine settings document applied to this index.
    #[serde(default)]
    pub settings: serde_json::Value,
}

impl IndexSpec {
    pub fn new(name: impl Into<String>, settings: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            settings,
        }
    }
}

/// Per-concept-type index group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptIndexGroup {
    /// Opaque schema document applied to every index in the group.
    #[serde(default)]
    pub mapping: serde_json::Value,
    pub indexes: Vec<IndexSpec>,
    /// Settings template for a dedicated per-collection index (granule only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub individual_index_settings: Option<serde_json::Value>,
    /// Collection ids currently mid-migration onto a dedicated index
    /// (granule only). Duplicate-free by construction.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub rebalancing_collections: BTreeSet<String>,
}

impl ConceptIndexGroup {
    pub fn new(mapping: serde_json::Value, indexes: Vec<IndexSpec>) -> Self {
        Self {
            mapping,
            indexes,
            individual_index_settings: None,
            rebalancing_collections: BTreeSet::new(),
        }
    }

    pub fn with_individual_settings(mut self, settings: serde_json::Value) -> Self {
        self.individual_index_settings = Some(settings);
        self
    }

    fn has_index(&self, name: &str) -> bool {
        self.indexes.iter().any(|spec| spec.name == name)
    }
}

/// The user-facing index-set definition.
///
/// Values are immutable: every mutation (including the rebalancing
/// transitions below) produces a new `IndexSet`, which the orchestration
/// layer threads through its load -> mutate -> persist pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSet {
    /// Client-assigned positive integer, immutable once created.
    pub id: i64,
    pub name: String,
    pub concepts: BTreeMap<ConceptType, ConceptIndexGroup>,
}

impl IndexSet {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            concepts: BTreeMap::new(),
        }
    }

    pub fn with_concept(mut self, concept: ConceptType, group: ConceptIndexGroup) -> Self {
        self.concepts.insert(concept, group);
        self
    }

    pub fn granule_group(&self) -> Option<&ConceptIndexGroup> {
        self.concepts.get(&ConceptType::Granule)
    }

    /// Transition: absent -> rebalancing.
    ///
    /// Marks `collection_id` as rebalancing and appends a dedicated granule
    /// index named after it, using the group's individual-index-settings.
    /// Returns a new value; the dedicated index addition is the structural
    /// (irreversible) part of the transition.
    pub fn start_rebalancing(&self, collection_id: &str) -> Result<IndexSet, RebalanceError> {
        let mut next = self.clone();
        let group = next
            .concepts
            .get_mut(&ConceptType::Granule)
            .ok_or(RebalanceError::MissingGranuleGroup)?;

        if group.rebalancing_collections.contains(collection_id) {
            return Err(RebalanceError::AlreadyRebalancing(collection_id.to_string()));
        }
        if group.has_index(collection_id) {
            // Defends against a double-split even if the marker was lost.
            return Err(RebalanceError::DuplicateIndex(collection_id.to_string()));
        }

        let settings = group
            .individual_index_settings
            .clone()
            .ok_or(RebalanceError::MissingIndividualSettings)?;

        group
            .rebalancing_collections
            .insert(collection_id.to_string());
        group.indexes.push(IndexSpec::new(collection_id, settings));

        Ok(next)
    }

    /// Transition: rebalancing -> settled.
    ///
    /// Clears the in-progress marker only; the dedicated index created by
    /// `start_rebalancing` remains part of the permanent layout.
    pub fn finalize_rebalancing(&self, collection_id: &str) -> Result<IndexSet, RebalanceError> {
        let mut next = self.clone();
        let group = next
            .concepts
            .get_mut(&ConceptType::Granule)
            .ok_or(RebalanceError::MissingGranuleGroup)?;

        if !group.rebalancing_collections.remove(collection_id) {
            return Err(RebalanceError::NotRebalancing(collection_id.to_string()));
        }

        Ok(next)
    }
}
