// File: ecopoints-ml/tests/classifier_tests.rs

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use ecopoints_common::Error;
use ecopoints_common::models::WasteCategory;
use ecopoints_ml::{ClassifierClient, ClassifierConfig, HttpClient, HttpResponse, ImageUpload};
use mockall::mock;
use mockall::predicate::eq;
use tokio_test::assert_err;

mock! {
    Http {}
    #[async_trait]
    impl HttpClient for Http {
        async fn post_file(&self, url: &str, field: &str, upload: &ImageUpload) -> Result<HttpResponse, Error>;
    }
}

fn png(size: usize) -> ImageUpload {
    ImageUpload::new("bottle.png", "image/png", vec![7u8; size])
}

fn ok_body(body: &str) -> HttpResponse {
    HttpResponse {
        status: 200,
        reason: Some("OK".into()),
        body: body.to_string(),
    }
}

fn client_with(mock: MockHttp) -> ClassifierClient {
    let config = ClassifierConfig {
        endpoint: "http://ml.test/predict".into(),
        ..ClassifierConfig::default()
    };
    ClassifierClient::new(Arc::new(mock), config)
}

#[tokio::test]
async fn test_classify_maps_label_and_confidence() -> Result<(), Error> {
    let mut http = MockHttp::new();
    http.expect_post_file()
        .with(eq("http://ml.test/predict"), eq("file"), mockall::predicate::always())
        .times(1)
        .returning(|_, _, _| Ok(ok_body(r#"{"class":"Organic","confidence":0.934}"#)));

    let result = client_with(http).classify(&png(1024)).await?;
    assert_eq!(result.category, WasteCategory::Biodegradable);
    assert_eq!(result.confidence, 93);
    Ok(())
}

#[tokio::test]
async fn test_unknown_label_and_bad_confidence_use_defaults() -> Result<(), Error> {
    let mut http = MockHttp::new();
    http.expect_post_file()
        .times(1)
        .returning(|_, _, _| Ok(ok_body(r#"{"class":"styrofoam","confidence":"very sure"}"#)));

    let result = client_with(http).classify(&png(10)).await?;
    assert_eq!(result.category, WasteCategory::Recyclable);
    assert_eq!(result.confidence, 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_fields_fall_back() -> Result<(), Error> {
    let mut http = MockHttp::new();
    http.expect_post_file()
        .times(1)
        .returning(|_, _, _| Ok(ok_body("{}")));

    let result = client_with(http).classify(&png(10)).await?;
    assert_eq!(result.category, WasteCategory::Recyclable);
    assert_eq!(result.confidence, 0);
    Ok(())
}

#[tokio::test]
async fn test_invalid_upload_never_hits_the_network() {
    let mut http = MockHttp::new();
    http.expect_post_file().never();
    let client = client_with(http);

    let gif = ImageUpload::new("cat.gif", "image/gif", vec![0u8; 10]);
    match client.classify(&gif).await {
        Err(Error::Validation(msg)) => assert_eq!(msg, "Only JPG, PNG or WEBP images are allowed."),
        other => panic!("expected validation error, got {:?}", other),
    }

    let huge = png(5 * 1024 * 1024 + 1);
    match client.classify(&huge).await {
        Err(Error::Validation(msg)) => assert_eq!(msg, "File size must be under 5MB."),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_includes_server_text() {
    let mut http = MockHttp::new();
    http.expect_post_file().times(1).returning(|_, _, _| {
        Ok(HttpResponse {
            status: 503,
            reason: Some("Service Unavailable".into()),
            body: "model warming up".into(),
        })
    });

    match client_with(http).classify(&png(10)).await {
        Err(Error::Request { status, message }) => {
            assert_eq!(status, Some(503));
            assert_eq!(message, "Prediction failed (503): model warming up");
        }
        other => panic!("expected request error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_without_body_uses_reason() {
    let mut http = MockHttp::new();
    http.expect_post_file().times(1).returning(|_, _, _| {
        Ok(HttpResponse {
            status: 404,
            reason: Some("Not Found".into()),
            body: String::new(),
        })
    });

    match client_with(http).classify(&png(10)).await {
        Err(Error::Request { message, .. }) => assert_eq!(message, "Prediction failed (404): Not Found"),
        other => panic!("expected request error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_request_error() {
    let mut http = MockHttp::new();
    http.expect_post_file()
        .times(1)
        .returning(|_, _, _| Ok(ok_body("<html>gateway</html>")));

    let err = assert_err!(client_with(http).classify(&png(10)).await);
    assert!(matches!(err, Error::Request { status: Some(200), .. }));
}

#[tokio::test]
async fn test_transport_failure_is_surfaced_once() {
    let mut http = MockHttp::new();
    http.expect_post_file()
        .times(1)
        .returning(|_, _, _| Err(Error::Request { status: None, message: "connection refused".into() }));

    let err = assert_err!(client_with(http).classify(&png(10)).await);
    assert!(matches!(err, Error::Request { status: None, .. }));
}

#[tokio::test]
async fn test_upload_from_path_reads_file() -> Result<(), Error> {
    let mut file = tempfile::Builder::new().suffix(".webp").tempfile()?;
    file.write_all(b"RIFF0000WEBP")?;

    let upload = ImageUpload::from_path(file.path()).await?;
    assert_eq!(upload.content_type, "image/webp");
    assert_eq!(upload.size(), 12);
    assert!(upload.file_name.ends_with(".webp"));
    Ok(())
}
