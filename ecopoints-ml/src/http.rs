//! HTTP client abstraction for the classification endpoint
//!
//! The classifier only ever needs one call: a multipart upload of a single file.
//! Keeping it behind a trait means tests can swap in a mock and never touch the
//! network, while production code uses the reqwest-backed [`DefaultHttpClient`].
//!
//! # Example Usage:
//! ``
//! use ecopoints_ml::http::{HttpClient, DefaultHttpClient};
//!
//! let client: Arc<dyn HttpClient> = Arc::new(DefaultHttpClient::new());
//! let response = client.post_file(url, "file", &upload).await?;
//! ``

use async_trait::async_trait;
use ecopoints_common::Error;
use tracing::debug;

use crate::upload::ImageUpload;

/// Status and body of a completed request. Non-2xx is not an error at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase, e.g. `"Bad Request"`.
    pub reason: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `upload` as a multipart form with one part named `field`.
    async fn post_file(&self, url: &str, field: &str, upload: &ImageUpload) -> Result<HttpResponse, Error>;
}

#[derive(Clone, Default)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn post_file(&self, url: &str, field: &str, upload: &ImageUpload) -> Result<HttpResponse, Error> {
        let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)?;
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);

        debug!("POST {} ({} bytes, field='{}')", url, upload.size(), field);
        let response = self.client
            .post(url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        // A body we cannot read is reported as empty; the status still tells the story.
        let body = response.text().await.unwrap_or_default();

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            body,
        })
    }
}
