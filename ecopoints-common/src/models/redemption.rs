// File: ecopoints-common/src/models/redemption.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::voucher::Voucher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedemptionStatus {
    Active,
    Used,
    Expired,
}

impl std::fmt::Display for RedemptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RedemptionStatus::Active => "active",
            RedemptionStatus::Used => "used",
            RedemptionStatus::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// A confirmed voucher purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redemption {
    pub redemption_id: Uuid,
    pub user_id: String,
    pub voucher_id: String,
    pub voucher_code: String,
    pub points_used: u64,
    pub status: RedemptionStatus,
    pub redeemed_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,

    /// The voucher as it looked when it was redeemed.
    pub voucher: Voucher,
}
