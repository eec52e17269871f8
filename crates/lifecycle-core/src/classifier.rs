//! Cleanup classifier - maps one account to the action this pass owes it
//!
//! Pure function of `(account, now, policy, session_active)`. The caller
//! probes session liveness immediately before classifying so the decision
//! reflects the freshest state available.

use chrono::{DateTime, Utc};

use crate::entities::Account;
use crate::policy::TimePolicy;

/// Action owed to an account, first matching rule wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupAction {
    /// Nothing to do this pass
    None,
    /// Send the one-time inactivity warning
    Warn,
    /// Hard-delete a signup that never verified its email
    DeleteUnverified,
    /// Anonymize and soft-delete a long-inactive account
    DeleteInactive,
}

impl std::fmt::Display for CleanupAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Warn => write!(f, "warn"),
            Self::DeleteUnverified => write!(f, "delete_unverified"),
            Self::DeleteInactive => write!(f, "delete_inactive"),
        }
    }
}

/// Classify one account against the time policy.
///
/// Decision order, first match wins:
/// 1. already deleted: terminal, nothing more to do
/// 2. live session: liveness overrides any staleness
/// 3. unverified past the verification window: hard delete
/// 4. verified and inactive past the deletion window: anonymize,
///    checked before warning so an account past both thresholds is
///    deleted outright instead of re-warned
/// 5. verified, unwarned, inactive past the warning window: warn once
///
/// Boundary equality counts as expired.
pub fn classify(
    account: &Account,
    now: DateTime<Utc>,
    policy: &TimePolicy,
    session_active: bool,
) -> CleanupAction {
    if account.deleted_at.is_some() {
        return CleanupAction::None;
    }
    if session_active {
        return CleanupAction::None;
    }

    if !account.email_verified {
        if now - account.created_at >= policy.verification_window() {
            return CleanupAction::DeleteUnverified;
        }
        return CleanupAction::None;
    }

    let inactive_for = now - account.last_activity;
    if inactive_for >= policy.deletion_window() {
        return CleanupAction::DeleteInactive;
    }
    if account.warned_at.is_none() && inactive_for >= policy.warning_window() {
        return CleanupAction::Warn;
    }

    CleanupAction::None
}
