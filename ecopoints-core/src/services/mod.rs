pub mod redemption_service;
pub mod submitter;

pub use redemption_service::RedemptionService;
pub use submitter::{RedemptionSubmitter, SimulatedSubmitter};
