// ================================================================
// File: ecopoints-common/src/error.rs
// ================================================================

use thiserror::Error;

/// Why a voucher redemption was refused.
///
/// Every variant is raised before the ledger is touched, so a rejected
/// attempt never leaves partial effects behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedemptionError {
    #[error("Insufficient points. You need {required} points but only have {available}.")]
    InsufficientPoints { required: u64, available: u64 },

    #[error("This voucher is currently out of stock.")]
    OutOfStock { voucher_id: String },

    #[error("This voucher is not currently available.")]
    Inactive { voucher_id: String },
}

impl RedemptionError {
    /// Stable machine-readable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            RedemptionError::InsufficientPoints { .. } => "insufficient_points",
            RedemptionError::OutOfStock { .. } => "out_of_stock",
            RedemptionError::Inactive { .. } => "voucher_inactive",
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found error: {0}")]
    NotFound(String),

    /// Bad input caught before any network or ledger work.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-success status or malformed body from a remote endpoint.
    #[error("Request error: {message}")]
    Request {
        status: Option<u16>,
        message: String,
    },

    #[error("Redemption rejected: {0}")]
    Redemption(#[from] RedemptionError),

    #[error("Submission error: {0}")]
    Submission(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The redemption rejection reason, if this error is one.
    pub fn redemption_reason(&self) -> Option<&'static str> {
        match self {
            Error::Redemption(e) => Some(e.reason()),
            _ => None,
        }
    }
}
