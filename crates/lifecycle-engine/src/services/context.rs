//! Engine context - dependency container for the cleanup pass
//!
//! Holds the repositories, collaborator ports, and the immutable time
//! policy. Built once at startup; a running pass never sees config
//! changes.

use std::sync::Arc;
use std::time::Duration;

use lifecycle_core::traits::{AccountRepository, SessionProbe, WarningMailer};
use lifecycle_core::TimePolicy;

/// Dependency container passed to the cleanup service
#[derive(Clone)]
pub struct EngineContext {
    accounts: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionProbe>,
    mailer: Arc<dyn WarningMailer>,
    policy: TimePolicy,
    probe_timeout: Duration,
    mail_timeout: Duration,
}

impl EngineContext {
    /// Create a new engine context with all dependencies
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        sessions: Arc<dyn SessionProbe>,
        mailer: Arc<dyn WarningMailer>,
        policy: TimePolicy,
        probe_timeout: Duration,
        mail_timeout: Duration,
    ) -> Self {
        Self {
            accounts,
            sessions,
            mailer,
            policy,
            probe_timeout,
            mail_timeout,
        }
    }

    /// Get the account repository
    pub fn accounts(&self) -> &dyn AccountRepository {
        self.accounts.as_ref()
    }

    /// Get the session liveness probe
    pub fn sessions(&self) -> &dyn SessionProbe {
        self.sessions.as_ref()
    }

    /// Get the warning mailer
    pub fn mailer(&self) -> &dyn WarningMailer {
        self.mailer.as_ref()
    }

    /// Get the time policy
    pub fn policy(&self) -> &TimePolicy {
        &self.policy
    }

    /// Enforced timeout on each liveness probe
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Enforced timeout on each warning email
    pub fn mail_timeout(&self) -> Duration {
        self.mail_timeout
    }
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("policy", &self.policy)
            .field("probe_timeout", &self.probe_timeout)
            .field("mail_timeout", &self.mail_timeout)
            .finish()
    }
}
