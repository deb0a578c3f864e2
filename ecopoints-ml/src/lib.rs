pub mod client;
pub mod config;
pub mod http;
pub mod labels;
pub mod upload;

// Re-export public APIs
pub use client::ClassifierClient;
pub use config::ClassifierConfig;
pub use http::{DefaultHttpClient, HttpClient, HttpResponse};
pub use upload::{ImageUpload, ImageValidation, validate_image};
