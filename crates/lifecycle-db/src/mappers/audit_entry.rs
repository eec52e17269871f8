//! Audit entry model -> entity mapper

use std::str::FromStr;

use lifecycle_core::entities::{AuditAction, AuditEntry};
use lifecycle_core::error::DomainError;
use lifecycle_core::value_objects::Snowflake;

use crate::models::AuditEntryModel;

/// Convert AuditEntryModel to AuditEntry, rejecting unknown action strings
impl TryFrom<AuditEntryModel> for AuditEntry {
    type Error = DomainError;

    fn try_from(model: AuditEntryModel) -> Result<Self, Self::Error> {
        let action = AuditAction::from_str(&model.action)
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(AuditEntry {
            id: model.id,
            account_id: Snowflake::new(model.account_id),
            action,
            created_at: model.created_at,
        })
    }
}
