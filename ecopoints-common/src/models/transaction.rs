// File: ecopoints-common/src/models/transaction.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earned,
    Redeemed,
    Bonus,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransactionKind::Earned => "earned",
            TransactionKind::Redeemed => "redeemed",
            TransactionKind::Bonus => "bonus",
        };
        f.write_str(s)
    }
}

/// Append-only ledger line. `points` is a signed delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: Uuid,
    pub user_id: String,
    pub kind: TransactionKind,
    pub points: i64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Totals over a transaction log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    /// Sum of `earned` deltas. Bonus credits are not included.
    pub total_earned: i64,
    /// Sum of absolute `redeemed` deltas.
    pub total_spent: u64,
    pub total_transactions: usize,
}

impl TransactionSummary {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = TransactionSummary::default();
        for t in transactions {
            match t.kind {
                TransactionKind::Earned => summary.total_earned += t.points,
                TransactionKind::Redeemed => summary.total_spent += t.points.unsigned_abs(),
                TransactionKind::Bonus => {}
            }
            summary.total_transactions += 1;
        }
        summary
    }
}
