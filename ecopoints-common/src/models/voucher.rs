// File: ecopoints-common/src/models/voucher.rs

use serde::{Deserialize, Serialize};

/// A catalog entry that can be bought with eco-points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: String,
    pub title: String,
    pub brand: String,
    #[serde(default)]
    pub description: String,
    /// Key into the category table, e.g. `"food"`.
    pub category: String,
    /// Display value such as `"₹200 OFF"`.
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub color: String,
    pub points_required: u64,
    pub validity_days: u32,

    /// `None` means stock is not tracked for this voucher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<u32>,

    pub is_active: bool,
}

impl Voucher {
    /// True when stock is tracked and nothing is left.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self.current_stock, Some(0))
    }
}

/// Static category metadata shown next to vouchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoucherCategory {
    pub key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
}
