//! Database-backed repository tests
//!
//! These tests require a running PostgreSQL instance and DATABASE_URL.
//! They return early when the environment is absent.
//!
//! Run with: cargo test -p integration-tests --test db_tests

use chrono::{Duration, Utc};

use integration_tests::{check_test_env, unverified_account, verified_account};
use lifecycle_core::entities::AuditAction;
use lifecycle_core::traits::{AccountRepository, AuditLogRepository};
use lifecycle_core::SnowflakeGenerator;
use lifecycle_db::{PgAccountRepository, PgAuditLogRepository, PgPool};

async fn test_pool() -> PgPool {
    let config = lifecycle_common::DatabaseConfig {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
        max_connections: 5,
        min_connections: 1,
    };
    let pool = lifecycle_db::create_pool(&config)
        .await
        .expect("Failed to connect to PostgreSQL");
    lifecycle_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

#[tokio::test]
async fn test_warn_flow_is_transactional_and_idempotent() {
    if !check_test_env() {
        return;
    }

    let pool = test_pool().await;
    let repo = PgAccountRepository::new(pool.clone());
    let audit = PgAuditLogRepository::new(pool);
    let id = SnowflakeGenerator::new(1).generate();

    let t0 = Utc::now();
    let account = verified_account(id.into_inner(), t0);
    repo.create(&account).await.unwrap();

    let warn_time = t0 + Duration::seconds(45);
    repo.mark_warned(id, warn_time).await.unwrap();
    // Second warn is a guarded no-op: no flag change, no second entry
    repo.mark_warned(id, warn_time + Duration::seconds(5))
        .await
        .unwrap();

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert!(stored.warned_at.is_some());

    let entries = audit.find_by_account(id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::Warned);

    // Fresh activity clears the warning
    repo.record_activity(id, warn_time + Duration::seconds(10))
        .await
        .unwrap();
    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.warned_at, None);
}

#[tokio::test]
async fn test_anonymize_and_soft_delete_scrubs_atomically() {
    if !check_test_env() {
        return;
    }

    let pool = test_pool().await;
    let repo = PgAccountRepository::new(pool.clone());
    let audit = PgAuditLogRepository::new(pool);
    let id = SnowflakeGenerator::new(2).generate();

    let t0 = Utc::now();
    let account = verified_account(id.into_inner(), t0 - Duration::days(90));
    let original_email = account.email.clone();
    repo.create(&account).await.unwrap();

    repo.anonymize_and_soft_delete(id, t0).await.unwrap();
    // Second delete is excluded by the terminal-state guard
    repo.anonymize_and_soft_delete(id, t0 + Duration::seconds(5))
        .await
        .unwrap();

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_ne!(stored.email, original_email);
    assert!(stored.anonymized);
    assert!(stored.deleted_at.is_some());

    let entries = audit.find_by_account(id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::DeletedInactive);

    // Fully deleted rows are out of pass scope
    let in_scope = repo.list_for_pass().await.unwrap();
    assert!(!in_scope.iter().any(|a| a.id == id));
}

#[tokio::test]
async fn test_hard_delete_removes_row_but_keeps_audit() {
    if !check_test_env() {
        return;
    }

    let pool = test_pool().await;
    let repo = PgAccountRepository::new(pool.clone());
    let audit = PgAuditLogRepository::new(pool);
    let id = SnowflakeGenerator::new(3).generate();

    let t0 = Utc::now();
    let account = unverified_account(id.into_inner(), t0 - Duration::seconds(30));
    repo.create(&account).await.unwrap();

    repo.hard_delete_unverified(id, t0).await.unwrap();

    assert!(repo.find_by_id(id).await.unwrap().is_none());
    let entries = audit.find_by_account(id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::DeletedUnverified);
}

#[tokio::test]
async fn test_hard_delete_spares_verified_accounts() {
    if !check_test_env() {
        return;
    }

    let pool = test_pool().await;
    let repo = PgAccountRepository::new(pool);
    let id = SnowflakeGenerator::new(4).generate();

    let t0 = Utc::now();
    let account = unverified_account(id.into_inner(), t0 - Duration::seconds(30));
    repo.create(&account).await.unwrap();

    // The account verifies between classification and execution: the
    // guard keeps the racing delete from landing
    repo.mark_email_verified(id, t0).await.unwrap();
    repo.hard_delete_unverified(id, t0).await.unwrap();

    assert!(repo.find_by_id(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_repair_brings_violating_row_back_into_invariant() {
    if !check_test_env() {
        return;
    }

    let pool = test_pool().await;
    let repo = PgAccountRepository::new(pool.clone());
    let audit = PgAuditLogRepository::new(pool);
    let id = SnowflakeGenerator::new(5).generate();

    let t0 = Utc::now();
    // Seed the invariant violation a past partial failure would leave
    let mut account = verified_account(id.into_inner(), t0 - Duration::days(90));
    account.deleted_at = Some(t0 - Duration::days(1));
    account.anonymized = false;
    repo.create(&account).await.unwrap();

    // Violating rows stay in pass scope until repaired
    let in_scope = repo.list_for_pass().await.unwrap();
    assert!(in_scope.iter().any(|a| a.id == id));

    repo.repair_anonymization(id, t0).await.unwrap();

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert!(stored.anonymized);
    assert!(!stored.email.contains("example.com"));

    let entries = audit.find_by_account(id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::AnonymizationRepaired);
}
