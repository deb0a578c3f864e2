use std::sync::Arc;

use chrono::{DateTime, Utc};
use ecopoints_common::Error;
use ecopoints_common::models::{Redemption, Transaction, TransactionKind, TransactionSummary, Voucher};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::ledger::{RedemptionReceipt, RewardsLedger};
use crate::services::submitter::RedemptionSubmitter;

/// Front door to the rewards ledger.
///
/// All attempts go through one mutex, held from the eligibility check until the
/// ledger update, so concurrent callers see redemptions one at a time.
pub struct RedemptionService {
    ledger: Arc<Mutex<RewardsLedger>>,
    submitter: Arc<dyn RedemptionSubmitter>,
}

impl RedemptionService {
    pub fn new(ledger: RewardsLedger, submitter: Arc<dyn RedemptionSubmitter>) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            submitter,
        }
    }

    /// Redeem one voucher for the ledger's user.
    ///
    ///  1) eligibility (inactive / insufficient_points / out_of_stock short-circuit here)
    ///  2) build code, expiry, records
    ///  3) submit; a failure leaves the ledger untouched
    ///  4) restamp at confirmation time and apply everything in one step
    pub async fn redeem(&self, voucher_id: &str) -> Result<RedemptionReceipt, Error> {
        let mut ledger = self.ledger.lock().await;

        let pending = match ledger.prepare_redemption(voucher_id, Utc::now()) {
            Ok(p) => p,
            Err(e) => {
                info!(
                    "Redemption of '{}' rejected (reason={}): {}",
                    voucher_id,
                    e.redemption_reason().unwrap_or("error"),
                    e
                );
                return Err(e);
            }
        };

        if let Err(e) = self.submitter.submit(&pending).await {
            warn!("Submission for '{}' failed => nothing applied: {}", voucher_id, e);
            return Err(e);
        }

        ledger.commit(pending.stamped_at(Utc::now())?)
    }

    pub async fn can_redeem(&self, voucher_id: &str) -> bool {
        self.ledger.lock().await.can_redeem(voucher_id)
    }

    pub async fn balance(&self) -> u64 {
        self.ledger.lock().await.balance()
    }

    pub async fn catalog(&self, category: Option<&str>) -> Vec<Voucher> {
        self.ledger.lock().await.catalog(category).cloned().collect()
    }

    pub async fn voucher(&self, voucher_id: &str) -> Option<Voucher> {
        self.ledger.lock().await.voucher(voucher_id).cloned()
    }

    pub async fn is_low_stock(&self, voucher: &Voucher) -> bool {
        self.ledger.lock().await.is_low_stock(voucher)
    }

    /// Newest first.
    pub async fn redemptions(&self) -> Vec<Redemption> {
        self.ledger.lock().await.redemptions().cloned().collect()
    }

    /// Newest first.
    pub async fn transactions(&self) -> Vec<Transaction> {
        self.ledger.lock().await.transactions().cloned().collect()
    }

    pub async fn summary(&self) -> TransactionSummary {
        self.ledger.lock().await.summary()
    }

    pub async fn award_points(
        &self,
        kind: TransactionKind,
        points: u64,
        description: &str,
    ) -> Result<Transaction, Error> {
        self.ledger.lock().await.award_points(kind, points, description, Utc::now())
    }

    pub async fn mark_used(&self, voucher_code: &str) -> Result<Redemption, Error> {
        self.ledger.lock().await.mark_used(voucher_code)
    }

    pub async fn expire_due(&self, now: DateTime<Utc>) -> usize {
        self.ledger.lock().await.expire_due(now)
    }
}
