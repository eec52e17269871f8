//! Audit log entry - append-only record of every lifecycle action

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Action recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Inactivity warning issued
    Warned,
    /// Unverified account hard-deleted
    DeletedUnverified,
    /// Inactive account anonymized and soft-deleted
    DeletedInactive,
    /// Anonymization re-run on a record found soft-deleted but unscrubbed
    AnonymizationRepaired,
}

impl AuditAction {
    /// Stable string form stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warned => "warned",
            Self::DeletedUnverified => "deleted_unverified",
            Self::DeletedInactive => "deleted_inactive",
            Self::AnonymizationRepaired => "anonymization_repaired",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an AuditAction from its stored string form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown audit action: {0}")]
pub struct AuditActionParseError(pub String);

impl std::str::FromStr for AuditAction {
    type Err = AuditActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warned" => Ok(Self::Warned),
            "deleted_unverified" => Ok(Self::DeletedUnverified),
            "deleted_inactive" => Ok(Self::DeletedInactive),
            "anonymization_repaired" => Ok(Self::AnonymizationRepaired),
            other => Err(AuditActionParseError(other.to_string())),
        }
    }
}

/// One audit log entry.
///
/// `account_id` is a plain identifier, not a foreign key, so entries
/// survive the hard-delete path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub account_id: Snowflake,
    pub action: AuditAction,
    pub created_at: DateTime<Utc>,
}
