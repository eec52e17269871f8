//! Periodic scheduler - fires a cleanup pass on a fixed interval
//!
//! Ticks run sequentially within one process; idempotent actions cover
//! overlap across processes. Shutdown waits for the pass in flight.

use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use lifecycle_engine::{CleanupService, EngineContext};

/// Run cleanup passes every `interval` until ctrl-c.
///
/// The first pass fires immediately on startup.
pub async fn run_scheduler(ctx: EngineContext, interval: Duration) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(interval_secs = interval.as_secs(), "Cleanup scheduler started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let service = CleanupService::new(&ctx);
                if let Err(e) = service.run_pass(Utc::now()).await {
                    // Pass-level failure (listing accounts); committed
                    // per-account work from earlier passes is unaffected
                    error!(error = %e, "Cleanup pass failed");
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received; stopping scheduler");
                return Ok(());
            }
        }
    }
}
