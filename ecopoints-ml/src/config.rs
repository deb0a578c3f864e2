use serde::{Deserialize, Serialize};

/// Environment variable holding the prediction endpoint URL.
pub const BACKEND_URL_VAR: &str = "ECOPOINTS_BACKEND_URL";

/// Used when no endpoint is configured (local development backend).
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/predict";

/// Configuration for the classification client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Full URL of the predict endpoint
    pub endpoint: String,

    /// Name of the multipart field carrying the image
    pub file_field: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_BACKEND_URL.to_string(),
            file_field: "file".to_string(),
        }
    }
}

impl ClassifierConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(url) = lookup(BACKEND_URL_VAR).filter(|v| !v.trim().is_empty()) {
            cfg.endpoint = url.trim().to_string();
        }
        cfg
    }
}
