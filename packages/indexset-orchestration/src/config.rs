use serde::{Deserialize, Serialize};

/// Orchestrator configuration, injected at construction.
///
/// `collection_key` is the document-store collection (the stored-document
/// index name in an engine-backed store) that stored index-set records live
/// in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    pub collection_key: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            collection_key: "index-sets".to_string(),
        }
    }
}
