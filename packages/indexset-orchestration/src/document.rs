use crate::error::Result;
use indexset_model::{decode_payload, encode_payload, prune, IndexSet, PrunedIndexSet};
use serde::{Deserialize, Serialize};

/// The persisted record for an index set.
///
/// `payload` is the client-facing pruned projection; `definition` is the
/// complete definition, which update and rebalancing reload to recover the
/// settings/mapping detail the projection intentionally drops. Both are
/// stored compressed and text-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredIndexSet {
    pub index_set_id: i64,
    pub index_set_name: String,
    pub payload: String,
    pub definition: String,
}

impl StoredIndexSet {
    /// Build the stored record from a definition. The pruned projection is
    /// derived here so the payload always matches the definition it rode in
    /// with.
    pub fn from_definition(set: &IndexSet) -> Result<Self> {
        Ok(Self {
            index_set_id: set.id,
            index_set_name: set.name.clone(),
            payload: encode_payload(&prune(set))?,
            definition: encode_payload(set)?,
        })
    }

    /// Decode the client-facing pruned projection.
    pub fn decode_pruned(&self) -> Result<PrunedIndexSet> {
        Ok(decode_payload(&self.payload)?)
    }

    /// Decode the complete definition.
    pub fn decode_definition(&self) -> Result<IndexSet> {
        Ok(decode_payload(&self.definition)?)
    }
}
