//! PostgreSQL implementation of AccountRepository
//!
//! Every lifecycle action runs in one transaction combining the row
//! mutation with its audit entry, guarded by a WHERE clause on the
//! expected prior state. A guard miss (another pass got there first)
//! commits nothing and returns Ok: actions are idempotent per account.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use lifecycle_core::entities::{anonymous_identity, Account, AuditAction};
use lifecycle_core::traits::{AccountRepository, RepoResult};
use lifecycle_core::value_objects::Snowflake;

use crate::models::AccountModel;

use super::error::{account_not_found, map_db_error};

/// PostgreSQL implementation of AccountRepository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new PgAccountRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append one audit entry inside an open transaction
async fn insert_audit(
    tx: &mut Transaction<'_, Postgres>,
    account_id: Snowflake,
    action: AuditAction,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO lifecycle_audit (account_id, action, created_at)
        VALUES ($1, $2, $3)
        ",
    )
    .bind(account_id.into_inner())
    .bind(action.as_str())
    .bind(now)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Account>> {
        // Soft-deleted rows stay visible: the classifier needs the
        // terminal state and the repair path needs unscrubbed rows
        let result = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, email, display_name, email_verified, created_at,
                   last_activity, warned_at, deleted_at, anonymized, updated_at
            FROM accounts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Account::from))
    }

    #[instrument(skip(self))]
    async fn list_for_pass(&self) -> RepoResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, email, display_name, email_verified, created_at,
                   last_activity, warned_at, deleted_at, anonymized, updated_at
            FROM accounts
            WHERE deleted_at IS NULL OR anonymized = FALSE
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Account::from).collect())
    }

    #[instrument(skip(self, account))]
    async fn create(&self, account: &Account) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO accounts (id, email, display_name, email_verified,
                                  created_at, last_activity, warned_at,
                                  deleted_at, anonymized, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(account.id.into_inner())
        .bind(&account.email)
        .bind(&account.display_name)
        .bind(account.email_verified)
        .bind(account.created_at)
        .bind(account.last_activity)
        .bind(account.warned_at)
        .bind(account.deleted_at)
        .bind(account.anonymized)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_email_verified(&self, id: Snowflake, now: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET email_verified = TRUE, updated_at = $2
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(account_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_activity(&self, id: Snowflake, now: DateTime<Utc>) -> RepoResult<()> {
        // Fresh activity also clears a standing warning
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET last_activity = $2, warned_at = NULL, updated_at = $2
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(account_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_warned(&self, id: Snowflake, now: DateTime<Utc>) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE accounts
            SET warned_at = $2, updated_at = $2
            WHERE id = $1 AND deleted_at IS NULL AND warned_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Guard miss: already warned or gone, nothing to commit
        if result.rows_affected() == 0 {
            return Ok(());
        }

        insert_audit(&mut tx, id, AuditAction::Warned, now)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn anonymize_and_soft_delete(&self, id: Snowflake, now: DateTime<Utc>) -> RepoResult<()> {
        let (email, display_name) = anonymous_identity(id);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE accounts
            SET email = $2, display_name = $3, anonymized = TRUE,
                deleted_at = $4, updated_at = $4
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(&email)
        .bind(&display_name)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Ok(());
        }

        insert_audit(&mut tx, id, AuditAction::DeletedInactive, now)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn repair_anonymization(&self, id: Snowflake, now: DateTime<Utc>) -> RepoResult<()> {
        let (email, display_name) = anonymous_identity(id);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE accounts
            SET email = $2, display_name = $3, anonymized = TRUE, updated_at = $4
            WHERE id = $1 AND deleted_at IS NOT NULL AND anonymized = FALSE
            ",
        )
        .bind(id.into_inner())
        .bind(&email)
        .bind(&display_name)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Ok(());
        }

        insert_audit(&mut tx, id, AuditAction::AnonymizationRepaired, now)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn hard_delete_unverified(&self, id: Snowflake, now: DateTime<Utc>) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Owned child rows cascade via the schema; the verified guard
        // keeps a racing verification flow from losing the account
        let result = sqlx::query(
            r"
            DELETE FROM accounts
            WHERE id = $1 AND deleted_at IS NULL AND email_verified = FALSE
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Ok(());
        }

        insert_audit(&mut tx, id, AuditAction::DeletedUnverified, now)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)
    }
}
