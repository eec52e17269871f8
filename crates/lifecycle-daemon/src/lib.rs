//! # lifecycle-daemon
//!
//! Wires configuration, storage, cache, and mail into an `EngineContext`
//! and drives the periodic cleanup scheduler.

pub mod scheduler;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use lifecycle_cache::{RedisPool, SessionLivenessStore};
use lifecycle_common::{try_init_tracing, AppConfig, TracingConfig};
use lifecycle_core::traits::{AccountRepository, SessionProbe, WarningMailer};
use lifecycle_db::PgAccountRepository;
use lifecycle_engine::{EngineContext, HttpMailer, LogMailer};

/// Load configuration, build the engine context, and run the scheduler
/// until shutdown.
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let tracing_config = if config.app.env.is_production() {
        TracingConfig::production()
    } else if config.app.env.is_development() {
        TracingConfig::development()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = try_init_tracing(&tracing_config) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        pass_interval_secs = config.lifecycle.pass_interval_secs,
        "Configuration loaded"
    );

    // A misconfigured policy must not silently run; a zeroed window is
    // a valid test acceleration and passes validation
    let policy = config.lifecycle.time_policy();
    policy.validate().context("Invalid lifecycle time policy")?;

    let pool = lifecycle_db::create_pool(&config.database)
        .await
        .context("Failed to connect to PostgreSQL")?;
    lifecycle_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let redis = RedisPool::from_config(&config.redis).context("Failed to create Redis pool")?;
    redis
        .health_check()
        .await
        .context("Redis health check failed")?;

    let accounts: Arc<dyn AccountRepository> = Arc::new(PgAccountRepository::new(pool));
    let sessions: Arc<dyn SessionProbe> = Arc::new(SessionLivenessStore::new(redis));
    let mailer: Arc<dyn WarningMailer> = match config.mail.clone() {
        Some(mail) => Arc::new(HttpMailer::new(mail)),
        None => {
            info!("No mail API configured; warnings will be logged only");
            Arc::new(LogMailer)
        }
    };

    let ctx = EngineContext::new(
        accounts,
        sessions,
        mailer,
        policy,
        Duration::from_secs(config.lifecycle.probe_timeout_secs),
        Duration::from_secs(config.lifecycle.mail_timeout_secs),
    );

    scheduler::run_scheduler(
        ctx,
        Duration::from_secs(config.lifecycle.pass_interval_secs),
    )
    .await
}
