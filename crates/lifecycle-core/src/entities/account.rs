//! Account entity - one user identity and its lifecycle fields

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::Snowflake;

/// Account entity carrying the fields the cleanup engine reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Snowflake,
    pub email: String,
    pub display_name: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub warned_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub anonymized: bool,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle state derived from the raw account fields, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Active,
    PendingVerification,
    Warned,
    Deleted,
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::PendingVerification => write!(f, "pending_verification"),
            Self::Warned => write!(f, "warned"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

impl Account {
    /// Create a new unverified account, as the registration flow would
    pub fn new(id: Snowflake, email: String, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            display_name,
            email_verified: false,
            created_at: now,
            last_activity: now,
            warned_at: None,
            deleted_at: None,
            anonymized: false,
            updated_at: now,
        }
    }

    /// Derive the lifecycle state from the raw fields
    pub fn lifecycle_state(&self) -> LifecycleState {
        if self.deleted_at.is_some() {
            LifecycleState::Deleted
        } else if !self.email_verified {
            LifecycleState::PendingVerification
        } else if self.warned_at.is_some() {
            LifecycleState::Warned
        } else {
            LifecycleState::Active
        }
    }

    /// Check if the account reached its terminal state
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// A soft-deleted row that never finished anonymization.
    /// Not a valid steady state; the pass repairs it on sight.
    #[inline]
    pub fn needs_anonymization_repair(&self) -> bool {
        self.deleted_at.is_some() && !self.anonymized
    }

    /// Record fresh activity: refreshes `last_activity` and clears a
    /// standing warning, as the request middleware does
    pub fn record_activity(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
        self.warned_at = None;
        self.updated_at = now;
    }

    /// Mark the email address as verified
    pub fn mark_email_verified(&mut self, now: DateTime<Utc>) {
        self.email_verified = true;
        self.updated_at = now;
    }

    /// Flag that the inactivity warning was issued
    pub fn mark_warned(&mut self, now: DateTime<Utc>) {
        self.warned_at = Some(now);
        self.updated_at = now;
    }

    /// Overwrite personal fields with their deterministic placeholders and
    /// soft-delete. Callers must commit both effects in one transaction.
    pub fn anonymize(&mut self, now: DateTime<Utc>) {
        let (email, display_name) = anonymous_identity(self.id);
        self.email = email;
        self.display_name = display_name;
        self.anonymized = true;
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

/// Deterministic, non-reversible replacement identity for an account.
///
/// UUIDv5 over the account id: stable across passes so a repair rewrites
/// the same placeholder, and not invertible back to the original fields.
pub fn anonymous_identity(id: Snowflake) -> (String, String) {
    let token = Uuid::new_v5(&Uuid::NAMESPACE_OID, id.to_string().as_bytes());
    (
        format!("deleted-{token}@anonymized.invalid"),
        format!("deleted-{token}"),
    )
}
