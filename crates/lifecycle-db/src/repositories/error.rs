//! Error handling utilities for repositories

use lifecycle_core::error::DomainError;
use lifecycle_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create an "account not found" error
pub fn account_not_found(id: Snowflake) -> DomainError {
    DomainError::AccountNotFound(id)
}
