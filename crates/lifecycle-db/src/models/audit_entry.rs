//! Audit log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for lifecycle_audit table.
///
/// `account_id` deliberately carries no foreign key so entries outlive
/// hard-deleted accounts.
#[derive(Debug, Clone, FromRow)]
pub struct AuditEntryModel {
    pub id: i64,
    pub account_id: i64,
    /// Lifecycle action stored as its stable string form
    pub action: String,
    pub created_at: DateTime<Utc>,
}
