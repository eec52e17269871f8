//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Account, AuditEntry};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Account Repository
// ============================================================================

/// Persistence port for accounts.
///
/// The lifecycle action methods (`mark_warned`, `anonymize_and_soft_delete`,
/// `repair_anonymization`, `hard_delete_unverified`) each commit the row
/// mutation and their audit entry in a single transaction, and are
/// idempotent: re-applying an action to a row no longer in the expected
/// state is a no-op.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Account>>;

    /// List the accounts a cleanup pass must look at: every non-deleted
    /// account, plus soft-deleted rows whose anonymization never committed
    async fn list_for_pass(&self) -> RepoResult<Vec<Account>>;

    /// Create a new account (registration collaborator)
    async fn create(&self, account: &Account) -> RepoResult<()>;

    /// Mark the email address verified (verification collaborator)
    async fn mark_email_verified(&self, id: Snowflake, now: DateTime<Utc>) -> RepoResult<()>;

    /// Refresh `last_activity` and clear a standing warning
    /// (request-middleware collaborator)
    async fn record_activity(&self, id: Snowflake, now: DateTime<Utc>) -> RepoResult<()>;

    /// Set `warned_at` and append a `warned` audit entry
    async fn mark_warned(&self, id: Snowflake, now: DateTime<Utc>) -> RepoResult<()>;

    /// Overwrite personal fields with their placeholders, set
    /// `anonymized` and `deleted_at`, and append a `deleted_inactive`
    /// audit entry
    async fn anonymize_and_soft_delete(&self, id: Snowflake, now: DateTime<Utc>) -> RepoResult<()>;

    /// Re-run anonymization on a soft-deleted row whose scrub never
    /// committed, appending an `anonymization_repaired` audit entry
    async fn repair_anonymization(&self, id: Snowflake, now: DateTime<Utc>) -> RepoResult<()>;

    /// Hard-delete a never-verified account and its owned child rows,
    /// appending a `deleted_unverified` audit entry
    async fn hard_delete_unverified(&self, id: Snowflake, now: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

/// Read side of the append-only audit log
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// All entries for one account, oldest first
    async fn find_by_account(&self, account_id: Snowflake) -> RepoResult<Vec<AuditEntry>>;

    /// Most recent entries across all accounts, newest first
    async fn recent(&self, limit: i64) -> RepoResult<Vec<AuditEntry>>;
}
