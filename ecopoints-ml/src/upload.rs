use std::path::Path;

use ecopoints_common::Error;

/// Content types the classification backend accepts.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Largest accepted upload, 5 MiB.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// An image file ready to be sent for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing the content type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = content_type_for_path(path);
        Ok(Self::new(file_name, content_type, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

fn content_type_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Outcome of [`validate_image`]. Invalid uploads carry a message fit for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ImageValidation {
    fn ok() -> Self {
        Self { is_valid: true, error: None }
    }

    fn rejected(reason: &str) -> Self {
        Self { is_valid: false, error: Some(reason.to_string()) }
    }

    /// Turn a rejection into a [`Error::Validation`].
    pub fn into_result(self) -> Result<(), Error> {
        match self.error {
            Some(reason) if !self.is_valid => Err(Error::Validation(reason)),
            _ => Ok(()),
        }
    }
}

/// Checks type first, then size.
pub fn validate_image(upload: &ImageUpload) -> ImageValidation {
    if !ALLOWED_CONTENT_TYPES.contains(&upload.content_type.as_str()) {
        return ImageValidation::rejected("Only JPG, PNG or WEBP images are allowed.");
    }
    if upload.size() > MAX_UPLOAD_BYTES {
        return ImageValidation::rejected("File size must be under 5MB.");
    }
    ImageValidation::ok()
}
