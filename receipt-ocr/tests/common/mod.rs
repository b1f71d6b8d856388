#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::Request;
use serde_json::{json, Value};

use receipt_ocr::config::{Config, LlmConfig, OcrConfig, ServerConfig};

pub const BOUNDARY: &str = "receipt-ocr-test-boundary";
pub const OCR_SECRET: &str = "test-secret";
pub const LLM_KEY: &str = "sk-test";

/// Config pointing both providers at mock servers, uploads at `upload_dir`.
pub fn test_config(upload_dir: &Path, ocr_url: Option<String>, llm_base_url: Option<String>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            upload_dir: upload_dir.to_path_buf(),
            max_upload_bytes: 10 * 1024 * 1024,
        },
        ocr: OcrConfig {
            api_url: ocr_url,
            secret_key: Some(OCR_SECRET.to_string()),
            timeout_secs: 5,
        },
        llm: LlmConfig {
            api_key: Some(LLM_KEY.to_string()),
            base_url: llm_base_url.unwrap_or_else(|| "http://127.0.0.1:1/v1".to_string()),
            model: "gpt-5-nano".to_string(),
            max_completion_tokens: 5000,
            timeout_secs: 5,
        },
    }
}

/// Encode one file part as `multipart/form-data`.
pub fn multipart_body(field: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Encode a plain text part with no file name.
pub fn multipart_text_body(field: &str, value: &str) -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n--{BOUNDARY}--\r\n"
    )
    .into_bytes()
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// OCR provider success body with one field per line.
pub fn ocr_success_body(lines: &[&str]) -> Value {
    let fields: Vec<Value> = lines
        .iter()
        .map(|line| {
            json!({
                "valueType": "ALL",
                "inferText": line,
                "inferConfidence": 0.99,
                "type": "NORMAL",
                "lineBreak": true
            })
        })
        .collect();

    json!({
        "version": "V2",
        "requestId": "req_test",
        "timestamp": 1,
        "images": [{
            "uid": "test",
            "name": "receipt",
            "inferResult": "SUCCESS",
            "message": "SUCCESS",
            "fields": fields
        }]
    })
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-5-nano",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ]
    })
}

pub fn files_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
