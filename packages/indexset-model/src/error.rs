use thiserror::Error;

/// Validation failure over a candidate index-set definition.
///
/// The message embeds the offending definition (serialized) so operators can
/// see exactly what was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Stored-payload codec failure.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Compression error: {0}")]
    Compression(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] base64::DecodeError),
}

/// Illegal rebalancing transition or shape for an index set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RebalanceError {
    #[error("Collection {0} is already rebalancing")]
    AlreadyRebalancing(String),

    #[error("Collection {0} is not rebalancing")]
    NotRebalancing(String),

    #[error("A granule index named {0} already exists")]
    DuplicateIndex(String),

    #[error("Index set has no granule concept group")]
    MissingGranuleGroup,

    #[error("Granule group has no individual-index-settings")]
    MissingIndividualSettings,
}
