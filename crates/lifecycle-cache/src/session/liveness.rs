//! Session liveness store in Redis.
//!
//! Each account owns one set of live session IDs under
//! `sessions:{account_id}`; the whole key expires `ttl_seconds` after the
//! last touch, so an idle account's sessions age out together. The
//! cleanup pass only ever reads set cardinality.

use async_trait::async_trait;
use redis::AsyncCommands;

use lifecycle_core::error::DomainError;
use lifecycle_core::traits::{RepoResult, SessionProbe};
use lifecycle_core::value_objects::Snowflake;

use crate::pool::{RedisPool, RedisResult};

/// Key prefix for per-account session sets
const SESSION_PREFIX: &str = "sessions:";

/// Default session TTL (1 hour since last touch)
const DEFAULT_SESSION_TTL: u64 = 60 * 60;

/// Redis-backed session liveness store
#[derive(Clone)]
pub struct SessionLivenessStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl SessionLivenessStore {
    /// Create a new session liveness store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: DEFAULT_SESSION_TTL,
        }
    }

    /// Create with custom session TTL
    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    /// Generate the Redis key for an account's session set
    fn key(account_id: Snowflake) -> String {
        format!("{SESSION_PREFIX}{account_id}")
    }

    /// Record activity on a session, refreshing the liveness TTL.
    /// Called by the session middleware on each authenticated request.
    pub async fn touch(&self, account_id: Snowflake, session_id: &str) -> RedisResult<()> {
        let key = Self::key(account_id);
        let mut conn = self.pool.get().await?;

        conn.sadd::<_, _, ()>(&key, session_id).await?;
        conn.expire::<_, ()>(&key, self.ttl_seconds as i64).await?;

        tracing::debug!(
            account_id = %account_id,
            session_id = %session_id,
            "Touched session"
        );

        Ok(())
    }

    /// Drop one session (logout)
    pub async fn end_session(&self, account_id: Snowflake, session_id: &str) -> RedisResult<()> {
        let key = Self::key(account_id);
        let mut conn = self.pool.get().await?;
        conn.srem::<_, _, ()>(&key, session_id).await?;

        tracing::debug!(
            account_id = %account_id,
            session_id = %session_id,
            "Ended session"
        );

        Ok(())
    }

    /// Count live sessions for an account
    pub async fn session_count(&self, account_id: Snowflake) -> RedisResult<u64> {
        let key = Self::key(account_id);
        let mut conn = self.pool.get().await?;
        let count: u64 = conn.scard(&key).await?;
        Ok(count)
    }
}

#[async_trait]
impl SessionProbe for SessionLivenessStore {
    async fn has_active_session(&self, account_id: Snowflake) -> RepoResult<bool> {
        let count = self
            .session_count(account_id)
            .await
            .map_err(|e| DomainError::SessionStoreError(e.to_string()))?;

        Ok(count > 0)
    }
}
