// src/lib.rs

pub mod catalog;
pub mod codegen;
pub mod config;
pub mod ledger;
pub mod services;
pub mod tasks;

pub use config::RewardsConfig;
pub use ecopoints_common::Error;
pub use ledger::{PendingRedemption, RedemptionReceipt, RewardsLedger};
pub use services::{RedemptionService, RedemptionSubmitter, SimulatedSubmitter};
