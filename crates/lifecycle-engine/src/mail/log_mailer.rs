//! Console-style mailer for environments without a mail API
//!
//! Logs the warning instead of sending it, like a development email
//! backend. Always succeeds.

use async_trait::async_trait;
use tracing::info;

use lifecycle_core::traits::{RepoResult, WarningMailer};

/// Mailer that writes warnings to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl WarningMailer for LogMailer {
    async fn send_inactivity_warning(&self, email: &str, display_name: &str) -> RepoResult<()> {
        info!(
            recipient = %email,
            display_name = %display_name,
            "Inactivity warning (log-only mailer)"
        );
        Ok(())
    }
}
