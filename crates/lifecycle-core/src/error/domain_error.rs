//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Account not found: {0}")]
    AccountNotFound(Snowflake),

    /// Relational store failure for one account's transaction
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Session store failure (not a timeout; timeouts degrade to inactive)
    #[error("Session store error: {0}")]
    SessionStoreError(String),

    /// Mail sink failure, never fatal to a pass
    #[error("Mail error: {0}")]
    MailError(String),
}

impl DomainError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound(_))
    }

    /// Transient collaborator failures are recovered locally: the account
    /// is skipped for the pass and re-examined next run
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_) | Self::SessionStoreError(_) | Self::MailError(_)
        )
    }
}
