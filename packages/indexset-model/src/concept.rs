use serde::{Deserialize, Serialize};

/// Concept type identifier
///
/// The closed set of domain categories an index set partitions its physical
/// indices by. The order of the variants fixes the order in which physical
/// index plans are produced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConceptType {
    Collection,
    Granule,
    Tag,
}

impl ConceptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConceptType::Collection => "collection",
            ConceptType::Granule => "granule",
            ConceptType::Tag => "tag",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "collection" => Some(ConceptType::Collection),
            "granule" => Some(ConceptType::Granule),
            "tag" => Some(ConceptType::Tag),
            _ => None,
        }
    }

    /// All concept types, in plan order.
    pub fn all() -> [ConceptType; 3] {
        [
            ConceptType::Collection,
            ConceptType::Granule,
            ConceptType::Tag,
        ]
    }
}

impl std::fmt::Display for ConceptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
