//! Background task that evicts expired records.
//!
//! Correctness never depends on this task: every registry read re-checks
//! expiry. The sweep only bounds memory held by records nobody reads again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::registry::Registry;

/// Periodically calls [`Registry::purge_expired`] until `shutdown` flips to `true`
/// or its sender is dropped.
///
/// The first sweep runs one full `period` after start.
pub async fn run_expiry_sweeper(
    registry: Arc<Registry>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(period_secs = period.as_secs(), "Expiry sweeper started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = registry.purge_expired();
                if removed > 0 {
                    info!(removed, "Swept expired short codes");
                } else {
                    debug!("Expiry sweep found nothing to remove");
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("Expiry sweeper stopped");
}
