//! External collaborator ports - session store and email sink

use async_trait::async_trait;

use crate::traits::RepoResult;
use crate::value_objects::Snowflake;

/// Session liveness probe.
///
/// Queried at action time, per account, never pre-fetched in bulk:
/// correctness over throughput, since a long pass must not act on
/// stale liveness.
#[async_trait]
pub trait SessionProbe: Send + Sync {
    /// Whether any non-expired session is bound to the account
    async fn has_active_session(&self, account_id: Snowflake) -> RepoResult<bool>;
}

/// Email sink for the inactivity warning.
///
/// Failures are non-fatal: the executor logs and swallows them, and
/// sets `warned_at` regardless.
#[async_trait]
pub trait WarningMailer: Send + Sync {
    /// Send the inactivity warning to one recipient
    async fn send_inactivity_warning(&self, email: &str, display_name: &str) -> RepoResult<()>;
}
