// File: src/config.rs

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use ecopoints_common::Error;

/// Settings for the in-memory rewards ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardsConfig {
    pub user_id: String,
    pub starting_balance: u64,
    /// How long the simulated redemption service takes to answer.
    pub submit_delay: Duration,
    /// Tracked stock below this is reported as low.
    pub low_stock_threshold: u32,
    pub expiry_sweep_interval: Duration,
    /// JSON catalog replacing the built-in vouchers.
    pub catalog_path: Option<PathBuf>,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            user_id: "user123".to_string(),
            starting_balance: 2500,
            submit_delay: Duration::from_millis(1500),
            low_stock_threshold: 10,
            expiry_sweep_interval: Duration::from_secs(60 * 60),
            catalog_path: None,
        }
    }
}

impl RewardsConfig {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `ECOPOINTS_*` keys through `lookup`; missing keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(user) = lookup("ECOPOINTS_USER_ID") {
            cfg.user_id = user.trim().to_string();
        }
        if let Some(balance) = parse_var(&lookup, "ECOPOINTS_STARTING_BALANCE")? {
            cfg.starting_balance = balance;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "ECOPOINTS_SUBMIT_DELAY_MS")? {
            cfg.submit_delay = Duration::from_millis(ms);
        }
        if let Some(threshold) = parse_var(&lookup, "ECOPOINTS_LOW_STOCK_THRESHOLD")? {
            cfg.low_stock_threshold = threshold;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "ECOPOINTS_EXPIRY_SWEEP_SECS")? {
            cfg.expiry_sweep_interval = Duration::from_secs(secs);
        }
        if let Some(path) = lookup("ECOPOINTS_CATALOG") {
            cfg.catalog_path = Some(PathBuf::from(path.trim()));
        }
        Ok(cfg)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::Config(format!("{}='{}': {}", key, raw, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_demo_account() {
        let cfg = RewardsConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg, RewardsConfig::default());
        assert_eq!(cfg.starting_balance, 2500);
        assert_eq!(cfg.user_id, "user123");
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = RewardsConfig::from_lookup(lookup_from(&[
            ("ECOPOINTS_STARTING_BALANCE", " 100 "),
            ("ECOPOINTS_SUBMIT_DELAY_MS", "0"),
            ("ECOPOINTS_CATALOG", "catalog.json"),
        ]))
        .unwrap();
        assert_eq!(cfg.starting_balance, 100);
        assert_eq!(cfg.submit_delay, Duration::ZERO);
        assert_eq!(cfg.catalog_path, Some(PathBuf::from("catalog.json")));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = RewardsConfig::from_lookup(lookup_from(&[
            ("ECOPOINTS_USER_ID", ""),
            ("ECOPOINTS_CATALOG", "   "),
            ("ECOPOINTS_STARTING_BALANCE", " "),
        ]))
        .unwrap();
        assert_eq!(cfg, RewardsConfig::default());
        assert_eq!(cfg.catalog_path, None);
    }

    #[test]
    fn bad_numbers_are_config_errors() {
        let err = RewardsConfig::from_lookup(lookup_from(&[("ECOPOINTS_STARTING_BALANCE", "-5")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
