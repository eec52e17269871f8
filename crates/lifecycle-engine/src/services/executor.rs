//! Action executor - performs the side effect one account is owed
//!
//! Each action delegates to a repository method that commits the row
//! mutation and its audit entry in a single transaction.

use chrono::{DateTime, Utc};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use lifecycle_core::entities::Account;
use lifecycle_core::CleanupAction;

use super::context::EngineContext;
use super::error::EngineResult;

/// Executes classified actions against one account at a time
pub(crate) struct ActionExecutor<'a> {
    ctx: &'a EngineContext,
}

impl<'a> ActionExecutor<'a> {
    pub(crate) fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// Apply one action. `CleanupAction::None` is handled by the caller.
    #[instrument(skip(self, account), fields(account_id = %account.id))]
    pub(crate) async fn execute(
        &self,
        account: &Account,
        action: CleanupAction,
        now: DateTime<Utc>,
    ) -> EngineResult<()> {
        match action {
            CleanupAction::Warn => self.warn(account, now).await,
            CleanupAction::DeleteUnverified => {
                self.ctx
                    .accounts()
                    .hard_delete_unverified(account.id, now)
                    .await?;
                info!(account_id = %account.id, "Hard-deleted unverified account");
                Ok(())
            }
            CleanupAction::DeleteInactive => {
                self.ctx
                    .accounts()
                    .anonymize_and_soft_delete(account.id, now)
                    .await?;
                info!(account_id = %account.id, "Anonymized and soft-deleted inactive account");
                Ok(())
            }
            CleanupAction::None => Ok(()),
        }
    }

    /// Send the warning email, then flag the account.
    ///
    /// A failed or slow send never blocks the flag: a missed
    /// notification is acceptable collateral, an un-flagged warned
    /// account would re-warn every pass.
    async fn warn(&self, account: &Account, now: DateTime<Utc>) -> EngineResult<()> {
        let send = self
            .ctx
            .mailer()
            .send_inactivity_warning(&account.email, &account.display_name);

        match timeout(self.ctx.mail_timeout(), send).await {
            Ok(Ok(())) => {
                debug!(account_id = %account.id, "Inactivity warning sent");
            }
            Ok(Err(e)) => {
                warn!(
                    account_id = %account.id,
                    error = %e,
                    "Inactivity warning failed to send; flagging anyway"
                );
            }
            Err(_) => {
                warn!(
                    account_id = %account.id,
                    "Inactivity warning timed out; flagging anyway"
                );
            }
        }

        self.ctx.accounts().mark_warned(account.id, now).await?;
        info!(account_id = %account.id, "Account flagged as warned");
        Ok(())
    }
}
