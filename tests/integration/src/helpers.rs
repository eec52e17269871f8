//! Test helpers for wiring engine contexts and guarding DB-backed tests

use std::sync::Arc;
use std::time::Duration;

use lifecycle_core::traits::{AccountRepository, SessionProbe, WarningMailer};
use lifecycle_core::TimePolicy;
use lifecycle_engine::EngineContext;

/// Default collaborator timeout used by engine tests; long enough for
/// in-memory ports, short enough to keep timeout tests quick
pub const TEST_TIMEOUT: Duration = Duration::from_millis(200);

/// Wire an engine context from test ports with the accelerated policy
/// (10s verification / 40s warning / 60s deletion)
pub fn engine_context(
    accounts: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionProbe>,
    mailer: Arc<dyn WarningMailer>,
) -> EngineContext {
    engine_context_with_policy(accounts, sessions, mailer, TimePolicy::accelerated())
}

/// Wire an engine context with a custom policy
pub fn engine_context_with_policy(
    accounts: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionProbe>,
    mailer: Arc<dyn WarningMailer>,
    policy: TimePolicy,
) -> EngineContext {
    EngineContext::new(
        accounts,
        sessions,
        mailer,
        policy,
        TEST_TIMEOUT,
        TEST_TIMEOUT,
    )
}

/// Check whether the database-backed test environment is available.
///
/// DB tests require a running PostgreSQL instance and DATABASE_URL.
/// When absent the tests return early instead of failing, so the
/// in-memory suite stays runnable anywhere.
pub fn check_test_env() -> bool {
    let _ = dotenvy::dotenv();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping: DATABASE_URL not set");
        return false;
    }
    true
}

/// Check whether the Redis-backed test environment is available
pub fn check_redis_env() -> bool {
    let _ = dotenvy::dotenv();
    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping: REDIS_URL not set");
        return false;
    }
    true
}
