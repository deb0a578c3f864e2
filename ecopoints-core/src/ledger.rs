// File: src/ledger.rs
//
// The single user's balance, voucher stock and the two append-only logs.
// Everything that changes them goes through this type.

use std::collections::VecDeque;

use chrono::{DateTime, Days, Utc};
use ecopoints_common::models::{
    Redemption, RedemptionStatus, Transaction, TransactionKind, TransactionSummary, Voucher,
};
use ecopoints_common::{Error, RedemptionError};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::codegen::generate_voucher_code;
use crate::config::RewardsConfig;

/// Records built for an approved attempt, not yet applied to the ledger.
#[derive(Debug, Clone)]
pub struct PendingRedemption {
    pub redemption: Redemption,
    pub transaction: Transaction,
}

impl PendingRedemption {
    pub fn voucher_id(&self) -> &str {
        &self.redemption.voucher_id
    }

    pub fn cost(&self) -> u64 {
        self.redemption.points_used
    }

    /// Moves the records to the confirmation time, keeping the validity period.
    pub fn stamped_at(mut self, now: DateTime<Utc>) -> Result<Self, Error> {
        self.redemption.expires_at = expiry_after(now, self.redemption.voucher.validity_days)?;
        self.redemption.redeemed_at = now;
        self.transaction.created_at = now;
        Ok(self)
    }
}

fn expiry_after(now: DateTime<Utc>, validity_days: u32) -> Result<DateTime<Utc>, Error> {
    now.checked_add_days(Days::new(u64::from(validity_days)))
        .ok_or_else(|| Error::Validation(format!("validity of {} days is out of range", validity_days)))
}

/// What the caller gets back from a confirmed redemption.
#[derive(Debug, Clone, Serialize)]
pub struct RedemptionReceipt {
    pub redemption: Redemption,
    pub transaction: Transaction,
    pub balance: u64,
    pub message: String,
}

pub struct RewardsLedger {
    user_id: String,
    balance: u64,
    vouchers: Vec<Voucher>,
    /// Newest first.
    redemptions: VecDeque<Redemption>,
    /// Newest first.
    transactions: VecDeque<Transaction>,
    low_stock_threshold: u32,
}

impl RewardsLedger {
    pub fn new(user_id: impl Into<String>, balance: u64, vouchers: Vec<Voucher>) -> Self {
        Self {
            user_id: user_id.into(),
            balance,
            vouchers,
            redemptions: VecDeque::new(),
            transactions: VecDeque::new(),
            low_stock_threshold: RewardsConfig::default().low_stock_threshold,
        }
    }

    pub fn from_config(config: &RewardsConfig, vouchers: Vec<Voucher>) -> Self {
        let mut ledger = Self::new(config.user_id.clone(), config.starting_balance, vouchers);
        ledger.low_stock_threshold = config.low_stock_threshold;
        ledger
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn voucher(&self, voucher_id: &str) -> Option<&Voucher> {
        self.vouchers.iter().find(|v| v.id == voucher_id)
    }

    /// Active vouchers, optionally limited to one category key.
    pub fn catalog<'a>(&'a self, category: Option<&'a str>) -> impl Iterator<Item = &'a Voucher> + 'a {
        self.vouchers
            .iter()
            .filter(move |v| v.is_active && category.is_none_or(|c| v.category == c))
    }

    pub fn is_low_stock(&self, voucher: &Voucher) -> bool {
        voucher.current_stock.is_some_and(|s| s < self.low_stock_threshold)
    }

    pub fn redemptions(&self) -> impl Iterator<Item = &Redemption> {
        self.redemptions.iter()
    }

    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn summary(&self) -> TransactionSummary {
        TransactionSummary::from_transactions(&self.transactions)
    }

    // ------------------------------------------------------------------
    // Redemption
    // ------------------------------------------------------------------

    /// Checks, in order: voucher exists, is active, balance covers the cost,
    /// tracked stock is above zero.
    pub fn check_eligibility(&self, voucher_id: &str) -> Result<&Voucher, Error> {
        let voucher = self
            .voucher(voucher_id)
            .ok_or_else(|| Error::NotFound(format!("voucher '{}'", voucher_id)))?;

        if !voucher.is_active {
            return Err(RedemptionError::Inactive { voucher_id: voucher.id.clone() }.into());
        }
        if self.balance < voucher.points_required {
            return Err(RedemptionError::InsufficientPoints {
                required: voucher.points_required,
                available: self.balance,
            }
            .into());
        }
        if voucher.is_out_of_stock() {
            return Err(RedemptionError::OutOfStock { voucher_id: voucher.id.clone() }.into());
        }
        Ok(voucher)
    }

    pub fn can_redeem(&self, voucher_id: &str) -> bool {
        self.check_eligibility(voucher_id).is_ok()
    }

    /// Builds the redemption and transaction records for `voucher_id` without
    /// changing anything. Fails with the eligibility error if not redeemable.
    pub fn prepare_redemption(&self, voucher_id: &str, now: DateTime<Utc>) -> Result<PendingRedemption, Error> {
        let voucher = self.check_eligibility(voucher_id)?;

        let delta = i64::try_from(voucher.points_required)
            .map(|p| -p)
            .map_err(|_| Error::Validation(format!("{} points is too large", voucher.points_required)))?;
        let expires_at = expiry_after(now, voucher.validity_days)?;
        let code = generate_voucher_code(&voucher.brand, now, &mut rand::rng());

        let redemption = Redemption {
            redemption_id: Uuid::new_v4(),
            user_id: self.user_id.clone(),
            voucher_id: voucher.id.clone(),
            voucher_code: code.clone(),
            points_used: voucher.points_required,
            status: RedemptionStatus::Active,
            redeemed_at: now,
            expires_at,
            voucher: voucher.clone(),
        };

        let transaction = Transaction {
            transaction_id: Uuid::new_v4(),
            user_id: self.user_id.clone(),
            kind: TransactionKind::Redeemed,
            points: delta,
            description: format!("Redeemed: {}", voucher.title),
            metadata: Some(json!({
                "voucherCode": code,
                "brand": voucher.brand,
                "category": voucher.category,
            })),
            created_at: now,
        };

        Ok(PendingRedemption { redemption, transaction })
    }

    /// Applies a prepared redemption in one step: both logs, balance, stock.
    ///
    /// Eligibility is checked again first, so a stale pending record is rejected
    /// rather than driving the balance or stock below zero.
    pub fn commit(&mut self, pending: PendingRedemption) -> Result<RedemptionReceipt, Error> {
        self.check_eligibility(pending.voucher_id())?;

        let cost = pending.cost();
        let voucher_id = pending.voucher_id().to_string();
        let new_balance = self.balance.checked_sub(cost).ok_or(RedemptionError::InsufficientPoints {
            required: cost,
            available: self.balance,
        })?;

        self.balance = new_balance;
        if let Some(v) = self.vouchers.iter_mut().find(|v| v.id == voucher_id) {
            if let Some(stock) = v.current_stock.as_mut() {
                *stock -= 1;
            }
        }
        self.redemptions.push_front(pending.redemption.clone());
        self.transactions.push_front(pending.transaction.clone());

        let message = format!(
            "Successfully redeemed {}! Your voucher code: {}",
            pending.redemption.voucher.title, pending.redemption.voucher_code
        );
        info!(
            "Redeemed '{}' for {} points => code={}, balance={}",
            voucher_id, cost, pending.redemption.voucher_code, self.balance
        );

        Ok(RedemptionReceipt {
            redemption: pending.redemption,
            transaction: pending.transaction,
            balance: self.balance,
            message,
        })
    }

    // ------------------------------------------------------------------
    // Earning and status changes
    // ------------------------------------------------------------------

    /// Credits `points` as an `earned` or `bonus` transaction.
    pub fn award_points(
        &mut self,
        kind: TransactionKind,
        points: u64,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Transaction, Error> {
        if kind == TransactionKind::Redeemed {
            return Err(Error::Validation("points can only be awarded as earned or bonus".into()));
        }
        if points == 0 {
            return Err(Error::Validation("awarded points must be positive".into()));
        }
        let delta = i64::try_from(points)
            .map_err(|_| Error::Validation(format!("{} points is too large", points)))?;
        let new_balance = self
            .balance
            .checked_add(points)
            .ok_or_else(|| Error::Validation("balance would overflow".into()))?;

        let transaction = Transaction {
            transaction_id: Uuid::new_v4(),
            user_id: self.user_id.clone(),
            kind,
            points: delta,
            description: description.into(),
            metadata: None,
            created_at: now,
        };
        self.balance = new_balance;
        self.transactions.push_front(transaction.clone());
        debug!("Awarded {} {} points => balance={}", points, kind, self.balance);
        Ok(transaction)
    }

    /// Marks an active redemption as used.
    pub fn mark_used(&mut self, voucher_code: &str) -> Result<Redemption, Error> {
        let redemption = self
            .redemptions
            .iter_mut()
            .find(|r| r.voucher_code == voucher_code)
            .ok_or_else(|| Error::NotFound(format!("redemption with code '{}'", voucher_code)))?;

        if redemption.status != RedemptionStatus::Active {
            return Err(Error::Validation(format!(
                "voucher code '{}' is {}, not active",
                voucher_code, redemption.status
            )));
        }
        redemption.status = RedemptionStatus::Used;
        Ok(redemption.clone())
    }

    /// Expires every active redemption whose expiry is at or before `now`.
    pub fn expire_due(&mut self, now: DateTime<Utc>) -> usize {
        let mut expired = 0;
        for r in self.redemptions.iter_mut() {
            if r.status == RedemptionStatus::Active && r.expires_at <= now {
                r.status = RedemptionStatus::Expired;
                expired += 1;
            }
        }
        expired
    }
}
