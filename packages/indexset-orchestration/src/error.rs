use crate::ports::{EngineError, StoreError};
use indexset_model::{CodecError, ValidationError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexSetError>;

/// Which phase of an orchestrated operation the engine failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    IndexCreation,
    DocumentIndexing,
}

impl EnginePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnginePhase::IndexCreation => "index creation",
            EnginePhase::DocumentIndexing => "document indexing",
        }
    }
}

impl std::fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum IndexSetError {
    /// Malformed id/name/index config. Client-caused, never retried.
    #[error("Invalid index-set data: {0}")]
    InvalidData(String),

    /// An index set with this id already exists (create path).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Operating on a nonexistent index-set id.
    #[error("Index set not found: {0}")]
    NotFound(String),

    /// Illegal rebalancing transition or duplicate dedicated-index creation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Underlying engine failure with the phase that produced it.
    #[error("Engine failure during {phase}: {message}")]
    Engine {
        phase: EnginePhase,
        message: String,
        #[source]
        source: EngineError,
    },

    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IndexSetError {
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn engine(phase: EnginePhase, message: impl Into<String>, source: EngineError) -> Self {
        Self::Engine {
            phase,
            message: message.into(),
            source,
        }
    }
}

impl From<ValidationError> for IndexSetError {
    fn from(err: ValidationError) -> Self {
        IndexSetError::InvalidData(err.message)
    }
}

impl From<CodecError> for IndexSetError {
    fn from(err: CodecError) -> Self {
        IndexSetError::Serialization(err.to_string())
    }
}
