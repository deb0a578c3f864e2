// src/tasks/expiry_sweep.rs

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::services::RedemptionService;

/// Spawns a background task that expires overdue redemptions every `interval`
/// (at least once a second).
pub fn spawn_expiry_sweep_task(
    service: Arc<RedemptionService>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    let interval = interval.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            run_expiry_sweep(&service, Utc::now()).await;
        }
    })
}

/// One sweep pass. Returns how many redemptions moved to `expired`.
pub async fn run_expiry_sweep(service: &RedemptionService, now: DateTime<Utc>) -> usize {
    let expired = service.expire_due(now).await;
    if expired > 0 {
        info!("Expiry sweep: {} redemption(s) expired", expired);
    } else {
        debug!("Expiry sweep: nothing to expire");
    }
    expired
}
