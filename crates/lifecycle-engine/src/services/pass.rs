//! Cleanup pass orchestration
//!
//! One pass scans every account still in scope, probes session liveness
//! at action time, classifies, executes, and accumulates a summary.
//! Per-account isolation: a failure on one account is logged and
//! counted, never aborts the pass, and leaves nothing half-committed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::timeout;
use tracing::{info, instrument, warn};

use lifecycle_core::entities::Account;
use lifecycle_core::{classify, CleanupAction, Snowflake};

use super::context::EngineContext;
use super::error::{EngineError, EngineResult};
use super::executor::ActionExecutor;

/// Counts accumulated over one cleanup pass, logged at the end.
/// Informational only; nothing reads them for control flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub warned: u64,
    pub deleted_unverified: u64,
    pub deleted_inactive: u64,
    pub skipped_active_session: u64,
    pub repaired: u64,
    pub errors: u64,
}

/// What happened to one account during a pass
enum AccountOutcome {
    Quiet,
    Warned,
    DeletedUnverified,
    DeletedInactive,
    SkippedActiveSession,
    Repaired,
}

impl PassSummary {
    fn record(&mut self, outcome: &AccountOutcome) {
        match outcome {
            AccountOutcome::Quiet => {}
            AccountOutcome::Warned => self.warned += 1,
            AccountOutcome::DeletedUnverified => self.deleted_unverified += 1,
            AccountOutcome::DeletedInactive => self.deleted_inactive += 1,
            AccountOutcome::SkippedActiveSession => self.skipped_active_session += 1,
            AccountOutcome::Repaired => self.repaired += 1,
        }
    }
}

/// Cleanup service - runs one pass over all accounts in scope
pub struct CleanupService<'a> {
    ctx: &'a EngineContext,
}

impl<'a> CleanupService<'a> {
    /// Create a new CleanupService
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// Run one complete scan-classify-execute cycle.
    ///
    /// Safe to invoke on overlapping schedules: every action re-reads
    /// fresh state and is idempotent per account, so a second pass can
    /// only no-op on accounts the first already handled.
    #[instrument(skip(self))]
    pub async fn run_pass(&self, now: DateTime<Utc>) -> EngineResult<PassSummary> {
        let accounts = self.ctx.accounts().list_for_pass().await?;
        info!(accounts = accounts.len(), "Cleanup pass started");

        let mut summary = PassSummary::default();
        let executor = ActionExecutor::new(self.ctx);

        for account in &accounts {
            match self.process_account(&executor, account, now).await {
                Ok(outcome) => summary.record(&outcome),
                Err(e) => {
                    // Skipped for this pass; picked up again next run
                    warn!(
                        account_id = %account.id,
                        error = %e,
                        transient = e.is_transient(),
                        "Account skipped after error"
                    );
                    summary.errors += 1;
                }
            }
        }

        info!(
            warned = summary.warned,
            deleted_unverified = summary.deleted_unverified,
            deleted_inactive = summary.deleted_inactive,
            skipped_active_session = summary.skipped_active_session,
            repaired = summary.repaired,
            errors = summary.errors,
            "Cleanup pass complete"
        );

        Ok(summary)
    }

    /// Probe, classify, and execute for a single account
    async fn process_account(
        &self,
        executor: &ActionExecutor<'a>,
        account: &Account,
        now: DateTime<Utc>,
    ) -> EngineResult<AccountOutcome> {
        // Invariant violation left by a past partial failure: repair
        // before anything else, never escalate
        if account.needs_anonymization_repair() {
            warn!(
                account_id = %account.id,
                "Soft-deleted account missing anonymization; repairing"
            );
            self.ctx
                .accounts()
                .repair_anonymization(account.id, now)
                .await?;
            return Ok(AccountOutcome::Repaired);
        }

        let session_active = self.probe_liveness(account.id).await?;
        let action = classify(account, now, self.ctx.policy(), session_active);

        if action == CleanupAction::None {
            // A live session that suppressed a pending action is worth
            // counting; a quiet account is not
            if session_active
                && classify(account, now, self.ctx.policy(), false) != CleanupAction::None
            {
                return Ok(AccountOutcome::SkippedActiveSession);
            }
            return Ok(AccountOutcome::Quiet);
        }

        executor.execute(account, action, now).await?;

        Ok(match action {
            CleanupAction::Warn => AccountOutcome::Warned,
            CleanupAction::DeleteUnverified => AccountOutcome::DeletedUnverified,
            CleanupAction::DeleteInactive => AccountOutcome::DeletedInactive,
            CleanupAction::None => AccountOutcome::Quiet,
        })
    }

    /// Probe session liveness with the enforced timeout.
    ///
    /// A timeout degrades to "not active" so inactivity wins fail-safe;
    /// a store error skips the account for this pass.
    async fn probe_liveness(&self, account_id: Snowflake) -> EngineResult<bool> {
        let probe = self.ctx.sessions().has_active_session(account_id);

        match timeout(self.ctx.probe_timeout(), probe).await {
            Ok(Ok(active)) => Ok(active),
            Ok(Err(e)) => Err(EngineError::from(e)),
            Err(_) => {
                warn!(
                    account_id = %account_id,
                    "Liveness probe timed out; treating as inactive"
                );
                Ok(false)
            }
        }
    }
}
