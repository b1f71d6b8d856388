mod common;

use std::time::Duration;

use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use receipt_ocr::config::OcrConfig;
use receipt_ocr::error::ReceiptError;
use receipt_ocr::ocr::OcrProvider;

fn ocr_config(api_url: String, timeout_secs: u64) -> OcrConfig {
    OcrConfig {
        api_url: Some(api_url),
        secret_key: Some(common::OCR_SECRET.to_string()),
        timeout_secs,
    }
}

fn write_receipt(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"fake-jpeg-bytes").unwrap();
    path
}

#[tokio::test]
async fn test_extract_text_joins_fields_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/general"))
        .and(header("X-OCR-SECRET", common::OCR_SECRET))
        .and(body_string_contains("\"version\":\"V2\""))
        .and(body_string_contains("\"format\":\"jpg\""))
        .and(body_string_contains("name=\"file\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::ocr_success_body(&["CAFE", "Latte 5,000", "TOTAL 5,000"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let receipt = write_receipt(dir.path(), "receipt.jpg");
    let provider = OcrProvider::new(&ocr_config(format!("{}/general", server.uri()), 5)).unwrap();

    let output = provider.extract_text(&receipt).await.unwrap();

    assert_eq!(output.text, "CAFE\nLatte 5,000\nTOTAL 5,000");
    assert_eq!(output.fields.len(), 3);
    assert_eq!(output.fields[1]["inferText"], "Latte 5,000");
}

#[tokio::test]
async fn test_png_and_pdf_formats_are_declared() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("\"format\":\"png\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ocr_success_body(&["png"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("\"format\":\"pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ocr_success_body(&["pdf"])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let provider = OcrProvider::new(&ocr_config(server.uri(), 5)).unwrap();

    let png = provider
        .extract_text(&write_receipt(dir.path(), "scan.PNG"))
        .await
        .unwrap();
    let pdf = provider
        .extract_text(&write_receipt(dir.path(), "scan.pdf"))
        .await
        .unwrap();

    assert_eq!(png.text, "png");
    assert_eq!(pdf.text, "pdf");
}

#[tokio::test]
async fn test_http_error_carries_status_and_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "code": "0002",
            "message": "Authentication failed"
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let provider = OcrProvider::new(&ocr_config(server.uri(), 5)).unwrap();

    let result = provider
        .extract_text(&write_receipt(dir.path(), "receipt.jpg"))
        .await;

    match result {
        Err(err @ ReceiptError::UpstreamHttp { status: 401, .. }) => {
            assert_eq!(err.to_string(), "OCR API error: 401 - Authentication failed");
        }
        other => panic!("Expected UpstreamHttp 401, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_without_message_uses_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let provider = OcrProvider::new(&ocr_config(server.uri(), 5)).unwrap();

    let err = provider
        .extract_text(&write_receipt(dir.path(), "receipt.jpg"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "OCR API error: 502 - unknown error");
}

#[tokio::test]
async fn test_missing_images_is_shape_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"images": []})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let provider = OcrProvider::new(&ocr_config(server.uri(), 5)).unwrap();

    let result = provider
        .extract_text(&write_receipt(dir.path(), "receipt.jpg"))
        .await;

    assert!(matches!(result, Err(ReceiptError::ResponseShape(_))));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    let provider = OcrProvider::new(&ocr_config("http://127.0.0.1:1/general".to_string(), 5)).unwrap();

    let result = provider
        .extract_text(&write_receipt(dir.path(), "receipt.jpg"))
        .await;

    assert!(matches!(result, Err(ReceiptError::Transport(_))));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::ocr_success_body(&["late"]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let provider = OcrProvider::new(&ocr_config(server.uri(), 1)).unwrap();

    let result = provider
        .extract_text(&write_receipt(dir.path(), "receipt.jpg"))
        .await;

    match result {
        Err(ReceiptError::Transport(message)) => assert!(message.contains("timed out")),
        other => panic!("Expected timeout, got: {other:?}"),
    }
}
