use std::sync::Arc;
use std::time::Instant;

use ecopoints_common::Error;
use ecopoints_common::models::ClassificationResult;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClassifierConfig;
use crate::http::{DefaultHttpClient, HttpClient};
use crate::labels::{confidence_percent, map_label};
use crate::upload::{ImageUpload, validate_image};

/// Body returned by the predict endpoint: `{ "class": "...", "confidence": 0.93 }`.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    confidence: Value,
}

/// Sends waste images to the classification backend.
pub struct ClassifierClient {
    http: Arc<dyn HttpClient>,
    config: ClassifierConfig,
}

impl ClassifierClient {
    pub fn new(http: Arc<dyn HttpClient>, config: ClassifierConfig) -> Self {
        Self { http, config }
    }

    /// Client backed by reqwest.
    pub fn with_default_http(config: ClassifierConfig) -> Self {
        Self::new(Arc::new(DefaultHttpClient::new()), config)
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Validate, upload, and map the backend's answer.
    ///
    /// One request, no retries. Invalid uploads never reach the network.
    pub async fn classify(&self, upload: &ImageUpload) -> Result<ClassificationResult, Error> {
        validate_image(upload).into_result()?;

        let started = Instant::now();
        let response = self.http
            .post_file(&self.config.endpoint, &self.config.file_field, upload)
            .await?;

        if !response.is_success() {
            let detail = if response.body.is_empty() {
                response.reason.clone().unwrap_or_default()
            } else {
                response.body.clone()
            };
            warn!("Classification request to {} failed with status {}", self.config.endpoint, response.status);
            return Err(Error::Request {
                status: Some(response.status),
                message: format!("Prediction failed ({}): {}", response.status, detail),
            });
        }

        let parsed: PredictResponse = serde_json::from_str(&response.body).map_err(|e| Error::Request {
            status: Some(response.status),
            message: format!("Malformed prediction response: {}", e),
        })?;

        let label = parsed.class.unwrap_or_default();
        let category = map_label(&label);
        let confidence = confidence_percent(&parsed.confidence);
        let processing_time_ms = started.elapsed().as_millis() as u64;

        debug!("Backend label '{}' => {}", label, category);
        info!(
            "Classified '{}' as {} ({}% confidence, {} ms)",
            upload.file_name, category, confidence, processing_time_ms
        );

        Ok(ClassificationResult {
            category,
            confidence,
            processing_time_ms,
        })
    }
}
