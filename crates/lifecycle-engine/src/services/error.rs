//! Engine error types

use lifecycle_core::DomainError;
use thiserror::Error;

/// Engine layer error type
#[derive(Debug, Error)]
pub enum EngineError {
    /// Error surfaced by a repository or collaborator port
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Transient failures skip one account and resolve on a later pass
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_transient(),
            Self::Internal(_) => false,
        }
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
