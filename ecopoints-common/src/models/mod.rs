// File: ecopoints-common/src/models/mod.rs
pub mod voucher;
pub mod redemption;
pub mod transaction;
pub mod classification;

pub use voucher::{Voucher, VoucherCategory};
pub use redemption::{Redemption, RedemptionStatus};
pub use transaction::{Transaction, TransactionKind, TransactionSummary};
pub use classification::{ClassificationResult, WasteCategory};
