//! ecopoints-cli/src/context.rs
//!
//! Builds everything a command needs from configuration.

use std::sync::Arc;

use ecopoints_core::catalog::{default_vouchers, load_catalog};
use ecopoints_core::{Error, RedemptionService, RewardsConfig, RewardsLedger, SimulatedSubmitter};
use ecopoints_ml::{ClassifierClient, ClassifierConfig};
use tracing::info;

use crate::Args;

pub struct AppContext {
    pub rewards_config: RewardsConfig,
    pub redemption_service: Arc<RedemptionService>,
    pub classifier: ClassifierClient,
}

impl AppContext {
    pub async fn new(args: &Args) -> Result<Self, Error> {
        // 1) Config from env, then CLI overrides
        let mut rewards_config = RewardsConfig::from_env()?;
        if let Some(balance) = args.balance {
            rewards_config.starting_balance = balance;
        }
        if let Some(path) = &args.catalog {
            rewards_config.catalog_path = Some(path.clone());
        }
        if let Some(ms) = args.submit_delay_ms {
            rewards_config.submit_delay = std::time::Duration::from_millis(ms);
        }

        let mut classifier_config = ClassifierConfig::from_env();
        if let Some(url) = &args.backend_url {
            classifier_config.endpoint = url.clone();
        }

        // 2) Catalog
        let vouchers = match &rewards_config.catalog_path {
            Some(path) => load_catalog(path).await?,
            None => default_vouchers(),
        };

        // 3) Ledger + service
        let ledger = RewardsLedger::from_config(&rewards_config, vouchers);
        let submitter = Arc::new(SimulatedSubmitter::new(rewards_config.submit_delay));
        let redemption_service = Arc::new(RedemptionService::new(ledger, submitter));

        info!(
            "Context ready: user={}, balance={}, classifier={}",
            rewards_config.user_id, rewards_config.starting_balance, classifier_config.endpoint
        );

        Ok(Self {
            rewards_config,
            redemption_service,
            classifier: ClassifierClient::with_default_http(classifier_config),
        })
    }
}
