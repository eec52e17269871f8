//! PostgreSQL implementation of AuditLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use lifecycle_core::entities::AuditEntry;
use lifecycle_core::traits::{AuditLogRepository, RepoResult};
use lifecycle_core::value_objects::Snowflake;

use crate::models::AuditEntryModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AuditLogRepository.
///
/// Read-only: writes happen inside the account repository's
/// transactions so action and audit commit together.
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    /// Create a new PgAuditLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self))]
    async fn find_by_account(&self, account_id: Snowflake) -> RepoResult<Vec<AuditEntry>> {
        let rows = sqlx::query_as::<_, AuditEntryModel>(
            r"
            SELECT id, account_id, action, created_at
            FROM lifecycle_audit
            WHERE account_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(account_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(AuditEntry::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn recent(&self, limit: i64) -> RepoResult<Vec<AuditEntry>> {
        let rows = sqlx::query_as::<_, AuditEntryModel>(
            r"
            SELECT id, account_id, action, created_at
            FROM lifecycle_audit
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(AuditEntry::try_from).collect()
    }
}
