// File: ecopoints-core/tests/test_utils/mod.rs
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ecopoints_common::models::Voucher;
use ecopoints_core::catalog::default_vouchers;
use ecopoints_core::{Error, PendingRedemption, RedemptionService, RedemptionSubmitter, RewardsLedger, SimulatedSubmitter};

/// A voucher with the given cost and stock; everything else is filler.
pub fn voucher(id: &str, cost: u64, stock: Option<u32>) -> Voucher {
    Voucher {
        id: id.to_string(),
        title: format!("Test voucher {}", id),
        brand: "Acme".to_string(),
        description: String::new(),
        category: "eco".to_string(),
        value: "FREE".to_string(),
        color: "#000000".to_string(),
        points_required: cost,
        validity_days: 30,
        current_stock: stock,
        is_active: true,
    }
}

/// Service over `vouchers` with an instant simulated submitter.
pub fn service_with(balance: u64, vouchers: Vec<Voucher>) -> RedemptionService {
    let ledger = RewardsLedger::new("user123", balance, vouchers);
    RedemptionService::new(ledger, Arc::new(SimulatedSubmitter::new(Duration::ZERO)))
}

/// The demo marketplace: 2500 points and the built-in vouchers.
pub fn demo_service() -> RedemptionService {
    service_with(2500, default_vouchers())
}

/// Always fails, counting how often it was asked.
#[derive(Default)]
pub struct FailingSubmitter {
    pub calls: AtomicUsize,
}

#[async_trait]
impl RedemptionSubmitter for FailingSubmitter {
    async fn submit(&self, _pending: &PendingRedemption) -> Result<(), Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::Submission("partner service unavailable".into()))
    }
}

/// Waits, then accepts and remembers when it answered.
#[derive(Default)]
pub struct ClockedSubmitter {
    pub delay: Duration,
    pub answered_at: Mutex<Option<DateTime<Utc>>>,
}

#[async_trait]
impl RedemptionSubmitter for ClockedSubmitter {
    async fn submit(&self, _pending: &PendingRedemption) -> Result<(), Error> {
        tokio::time::sleep(self.delay).await;
        *self.answered_at.lock().unwrap() = Some(Utc::now());
        Ok(())
    }
}
