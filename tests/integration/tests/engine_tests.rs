//! Cleanup engine integration tests
//!
//! Exercise the full probe → classify → execute → audit cycle against
//! in-memory ports. No external services required.
//!
//! Run with: cargo test -p integration-tests --test engine_tests

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};

use integration_tests::{
    engine_context, unverified_account, verified_account, FailingProbe, FixedProbe,
    MemoryAccountStore, RecordingMailer, SlowProbe,
};
use lifecycle_core::entities::AuditAction;
use lifecycle_core::traits::AuditLogRepository;
use lifecycle_core::Snowflake;
use lifecycle_engine::{CleanupService, PassSummary};

// ============================================================================
// Scenario tests (accelerated policy: 10s verification, 40s warn, 60s delete)
// ============================================================================

#[tokio::test]
async fn test_scenario_a_unverified_account_hard_deleted() {
    let t0 = Utc::now();
    let store = MemoryAccountStore::with_accounts([unverified_account(1, t0)]);
    let mailer = RecordingMailer::new();
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(FixedProbe::inactive()),
        Arc::new(mailer.clone()),
    );

    let summary = CleanupService::new(&ctx)
        .run_pass(t0 + Duration::seconds(11))
        .await
        .unwrap();

    assert_eq!(
        summary,
        PassSummary {
            deleted_unverified: 1,
            ..PassSummary::default()
        }
    );
    // Hard delete: the row is gone, the audit entry survives
    assert!(store.get(1).is_none());
    assert_eq!(store.audit_actions(1), vec![AuditAction::DeletedUnverified]);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_scenario_b_warn_once_then_hold() {
    let t0 = Utc::now();
    let account = verified_account(1, t0);
    let email = account.email.clone();
    let store = MemoryAccountStore::with_accounts([account]);
    let mailer = RecordingMailer::new();
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(FixedProbe::inactive()),
        Arc::new(mailer.clone()),
    );
    let service = CleanupService::new(&ctx);

    let warn_time = t0 + Duration::seconds(45);
    let summary = service.run_pass(warn_time).await.unwrap();
    assert_eq!(
        summary,
        PassSummary {
            warned: 1,
            ..PassSummary::default()
        }
    );
    assert_eq!(store.get(1).unwrap().warned_at, Some(warn_time));
    assert_eq!(mailer.sent(), vec![email]);

    // Second pass under the deletion window: already warned, nothing to do
    let summary = service.run_pass(t0 + Duration::seconds(50)).await.unwrap();
    assert_eq!(summary, PassSummary::default());
    assert_eq!(store.get(1).unwrap().warned_at, Some(warn_time));
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_scenario_c_deletion_beats_standing_warning() {
    let t0 = Utc::now();
    let account = verified_account(1, t0);
    let original_email = account.email.clone();
    let store = MemoryAccountStore::with_accounts([account]);
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(FixedProbe::inactive()),
        Arc::new(RecordingMailer::new()),
    );
    let service = CleanupService::new(&ctx);

    service.run_pass(t0 + Duration::seconds(45)).await.unwrap();

    let delete_time = t0 + Duration::seconds(61);
    let summary = service.run_pass(delete_time).await.unwrap();
    assert_eq!(
        summary,
        PassSummary {
            deleted_inactive: 1,
            ..PassSummary::default()
        }
    );

    // Anonymize-then-flag is atomic: scrubbed email and the flag together
    let account = store.get(1).unwrap();
    assert_ne!(account.email, original_email);
    assert!(account.anonymized);
    assert_eq!(account.deleted_at, Some(delete_time));
    assert_eq!(
        store.audit_actions(1),
        vec![AuditAction::Warned, AuditAction::DeletedInactive]
    );
}

#[tokio::test]
async fn test_scenario_d_active_session_shields_every_pass() {
    let t0 = Utc::now();
    let account = verified_account(1, t0);
    let original = account.clone();
    let store = MemoryAccountStore::with_accounts([account]);
    let probe = FixedProbe::active_for([1]);
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(probe.clone()),
        Arc::new(RecordingMailer::new()),
    );
    let service = CleanupService::new(&ctx);

    // Far past both windows on every pass, but the session holds
    for days in [1, 30, 365] {
        let summary = service.run_pass(t0 + Duration::days(days)).await.unwrap();
        assert_eq!(
            summary,
            PassSummary {
                skipped_active_session: 1,
                ..PassSummary::default()
            }
        );
    }
    assert_eq!(store.get(1).unwrap(), original);

    // Session ends: the next pass deletes
    probe.clear(1);
    let summary = service.run_pass(t0 + Duration::days(366)).await.unwrap();
    assert_eq!(summary.deleted_inactive, 1);
}

// ============================================================================
// Idempotence
// ============================================================================

#[tokio::test]
async fn test_double_pass_repeats_nothing_destructive() {
    let t0 = Utc::now();
    let store = MemoryAccountStore::with_accounts([
        unverified_account(1, t0),              // -> delete_unverified
        verified_account(2, t0),                // -> warn
        verified_account(3, t0 - Duration::seconds(30)), // -> delete_inactive
        verified_account(4, t0),                // session-active, shielded
        verified_account(5, t0 + Duration::seconds(40)), // fresh, quiet
    ]);
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(FixedProbe::active_for([4])),
        Arc::new(RecordingMailer::new()),
    );
    let service = CleanupService::new(&ctx);

    let now = t0 + Duration::seconds(45);
    let first = service.run_pass(now).await.unwrap();
    assert_eq!(
        first,
        PassSummary {
            warned: 1,
            deleted_unverified: 1,
            deleted_inactive: 1,
            skipped_active_session: 1,
            ..PassSummary::default()
        }
    );

    // Same instant, same account set: only the re-evaluated categories
    // repeat; nothing is warned or deleted twice
    let second = service.run_pass(now).await.unwrap();
    assert_eq!(
        second,
        PassSummary {
            skipped_active_session: 1,
            ..PassSummary::default()
        }
    );
    assert_eq!(store.audit_entries().len(), 3);
}

// ============================================================================
// Collaborator failure handling
// ============================================================================

#[tokio::test]
async fn test_mail_failure_still_flags_warned() {
    let t0 = Utc::now();
    let store = MemoryAccountStore::with_accounts([verified_account(1, t0)]);
    let mailer = RecordingMailer::failing();
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(FixedProbe::inactive()),
        Arc::new(mailer.clone()),
    );

    let warn_time = t0 + Duration::seconds(45);
    let summary = CleanupService::new(&ctx).run_pass(warn_time).await.unwrap();

    // Missed notification is acceptable collateral; the flag is not
    assert_eq!(summary.warned, 1);
    assert_eq!(summary.errors, 0);
    assert_eq!(store.get(1).unwrap().warned_at, Some(warn_time));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_probe_error_skips_account_until_next_pass() {
    let t0 = Utc::now();
    let store = MemoryAccountStore::with_accounts([verified_account(1, t0)]);
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(FailingProbe),
        Arc::new(RecordingMailer::new()),
    );

    let now = t0 + Duration::seconds(61);
    let summary = CleanupService::new(&ctx).run_pass(now).await.unwrap();
    assert_eq!(
        summary,
        PassSummary {
            errors: 1,
            ..PassSummary::default()
        }
    );
    assert!(store.get(1).unwrap().deleted_at.is_none());

    // Next pass with a healthy session store picks the account up
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(FixedProbe::inactive()),
        Arc::new(RecordingMailer::new()),
    );
    let summary = CleanupService::new(&ctx).run_pass(now).await.unwrap();
    assert_eq!(summary.deleted_inactive, 1);
}

#[tokio::test]
async fn test_probe_timeout_degrades_to_inactive() {
    let t0 = Utc::now();
    let store = MemoryAccountStore::with_accounts([verified_account(1, t0)]);
    // The probe would answer "active", but only after the enforced
    // timeout: inactivity wins fail-safe
    let probe = SlowProbe {
        delay: StdDuration::from_secs(5),
    };
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(probe),
        Arc::new(RecordingMailer::new()),
    );

    let summary = CleanupService::new(&ctx)
        .run_pass(t0 + Duration::seconds(61))
        .await
        .unwrap();

    assert_eq!(summary.deleted_inactive, 1);
    assert_eq!(summary.errors, 0);
    assert!(store.get(1).unwrap().anonymized);
}

#[tokio::test]
async fn test_db_error_skips_account_and_recovers() {
    let t0 = Utc::now();
    let store = MemoryAccountStore::with_accounts([verified_account(1, t0)]);
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(FixedProbe::inactive()),
        Arc::new(RecordingMailer::new()),
    );
    let service = CleanupService::new(&ctx);

    store.set_fail_writes(true);
    let warn_time = t0 + Duration::seconds(45);
    let summary = service.run_pass(warn_time).await.unwrap();
    assert_eq!(summary.errors, 1);
    assert_eq!(store.get(1).unwrap().warned_at, None);

    store.set_fail_writes(false);
    let summary = service.run_pass(warn_time).await.unwrap();
    assert_eq!(summary.warned, 1);
    assert_eq!(store.get(1).unwrap().warned_at, Some(warn_time));
}

// ============================================================================
// Invariant repair
// ============================================================================

#[tokio::test]
async fn test_partial_anonymization_is_repaired_once() {
    let t0 = Utc::now();
    // A past partial failure: soft-deleted but never scrubbed
    let mut account = verified_account(1, t0 - Duration::days(90));
    account.deleted_at = Some(t0 - Duration::days(1));
    account.anonymized = false;
    let original_email = account.email.clone();

    let store = MemoryAccountStore::with_accounts([account]);
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(FixedProbe::inactive()),
        Arc::new(RecordingMailer::new()),
    );
    let service = CleanupService::new(&ctx);

    let summary = service.run_pass(t0).await.unwrap();
    assert_eq!(
        summary,
        PassSummary {
            repaired: 1,
            ..PassSummary::default()
        }
    );

    let repaired = store.get(1).unwrap();
    assert!(repaired.anonymized);
    assert_ne!(repaired.email, original_email);
    assert_eq!(
        store.audit_actions(1),
        vec![AuditAction::AnonymizationRepaired]
    );

    // Fully deleted rows leave the pass scope entirely
    let summary = service.run_pass(t0 + Duration::seconds(1)).await.unwrap();
    assert_eq!(summary, PassSummary::default());
}

// ============================================================================
// Middleware contract and audit reads
// ============================================================================

#[tokio::test]
async fn test_recorded_activity_resets_warning_cycle() {
    use lifecycle_core::traits::AccountRepository;

    let t0 = Utc::now();
    let store = MemoryAccountStore::with_accounts([verified_account(1, t0)]);
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(FixedProbe::inactive()),
        Arc::new(RecordingMailer::new()),
    );
    let service = CleanupService::new(&ctx);

    service.run_pass(t0 + Duration::seconds(45)).await.unwrap();
    assert!(store.get(1).unwrap().warned_at.is_some());

    // The user comes back: middleware records activity, warning clears
    let active_at = t0 + Duration::seconds(50);
    store
        .record_activity(Snowflake::new(1), active_at)
        .await
        .unwrap();
    assert_eq!(store.get(1).unwrap().warned_at, None);

    // Quiet again while fresh, and a full new warn cycle later
    let summary = service.run_pass(t0 + Duration::seconds(55)).await.unwrap();
    assert_eq!(summary, PassSummary::default());

    let summary = service.run_pass(active_at + Duration::seconds(41)).await.unwrap();
    assert_eq!(summary.warned, 1);
    assert_eq!(store.audit_actions(1).len(), 2);
}

#[tokio::test]
async fn test_audit_log_reads() {
    let t0 = Utc::now();
    let store = MemoryAccountStore::with_accounts([
        verified_account(1, t0),
        unverified_account(2, t0),
    ]);
    let ctx = engine_context(
        Arc::new(store.clone()),
        Arc::new(FixedProbe::inactive()),
        Arc::new(RecordingMailer::new()),
    );

    CleanupService::new(&ctx)
        .run_pass(t0 + Duration::seconds(45))
        .await
        .unwrap();

    let for_one = store.find_by_account(Snowflake::new(1)).await.unwrap();
    assert_eq!(for_one.len(), 1);
    assert_eq!(for_one[0].action, AuditAction::Warned);

    let recent = store.recent(10).await.unwrap();
    assert_eq!(recent.len(), 2);

    let recent_one = store.recent(1).await.unwrap();
    assert_eq!(recent_one.len(), 1);
}
