use std::time::Duration;

use async_trait::async_trait;
use ecopoints_common::Error;
use tracing::debug;

use crate::ledger::PendingRedemption;

/// Hands an approved redemption to whatever confirms it (a voucher partner,
/// a payment service). An `Err` aborts the attempt before the ledger changes.
#[async_trait]
pub trait RedemptionSubmitter: Send + Sync {
    async fn submit(&self, pending: &PendingRedemption) -> Result<(), Error>;
}

/// Stands in for a remote service: waits, then accepts.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl RedemptionSubmitter for SimulatedSubmitter {
    async fn submit(&self, pending: &PendingRedemption) -> Result<(), Error> {
        debug!(
            "Submitting redemption of '{}' (code {}) after {:?}",
            pending.voucher_id(),
            pending.redemption.voucher_code,
            self.delay
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}
