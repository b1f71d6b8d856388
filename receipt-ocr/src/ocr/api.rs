use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use nanoid::nanoid;
use reqwest::{multipart, Client};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::OcrConfig;
use crate::error::{ReceiptError, Result};

const PROTOCOL_VERSION: &str = "V2";
const IMAGE_NAME: &str = "receipt";
const SERVICE: &str = "OCR";

const REQUEST_ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Text recognized in one uploaded receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrOutput {
    /// `inferText` of every field, in provider order, one per line.
    pub text: String,
    /// Raw provider fields, passed through untouched.
    pub fields: Vec<Value>,
}

#[derive(Clone, Debug)]
pub struct OcrApiClient {
    client: Client,
    api_url: String,
    secret_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OcrRequestMessage {
    images: Vec<OcrImageEntry>,
    request_id: String,
    version: &'static str,
    timestamp: i64,
}

#[derive(Debug, Serialize)]
struct OcrImageEntry {
    format: &'static str,
    name: &'static str,
}

/// Image format declared to the provider, derived from the file extension.
pub fn format_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match ext.as_deref() {
        Some("png") => "png",
        Some("pdf") => "pdf",
        _ => "jpg",
    }
}

/// Correlation id for one OCR call: `req_<millis>_<9 base36 chars>`.
pub fn generate_request_id() -> String {
    format!(
        "req_{}_{}",
        Utc::now().timestamp_millis(),
        nanoid!(9, &REQUEST_ID_ALPHABET)
    )
}

impl OcrApiClient {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let (Some(api_url), Some(secret_key)) = (config.api_url.clone(), config.secret_key.clone())
        else {
            return Err(ReceiptError::ConfigurationMissing(
                "OCR API URL or secret key".to_string(),
            ));
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReceiptError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url,
            secret_key,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub async fn extract_text(&self, file_path: &Path) -> Result<OcrOutput> {
        let bytes = tokio::fs::read(file_path).await?;
        let file_name = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(IMAGE_NAME)
            .to_string();

        let message = OcrRequestMessage {
            images: vec![OcrImageEntry {
                format: format_for_path(file_path),
                name: IMAGE_NAME,
            }],
            request_id: generate_request_id(),
            version: PROTOCOL_VERSION,
            timestamp: Utc::now().timestamp_millis(),
        };
        debug!(request_id = %message.request_id, format = message.images[0].format, "Sending OCR request");

        let message_json = serde_json::to_string(&message)
            .map_err(|e| ReceiptError::Internal(format!("Failed to encode OCR message: {e}")))?;

        let mime = mime_guess::from_path(file_path).first_or_octet_stream();
        let file_part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.as_ref())
            .map_err(|e| ReceiptError::Internal(format!("Invalid MIME type: {e}")))?;

        let form = multipart::Form::new()
            .text("message", message_json)
            .part("file", file_part);

        let response = self
            .client
            .post(&self.api_url)
            .header("X-OCR-SECRET", &self.secret_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OCR request did not complete");
                if e.is_timeout() {
                    ReceiptError::Transport("OCR API request timed out".to_string())
                } else {
                    ReceiptError::Transport("Network error or OCR API connection failure".to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read OCR response body");
            ReceiptError::Transport("Network error or OCR API connection failure".to_string())
        })?;

        if !status.is_success() {
            let message = upstream_message(&body);
            warn!(status = status.as_u16(), %message, "OCR API returned an error");
            return Err(ReceiptError::UpstreamHttp {
                service: SERVICE,
                status: status.as_u16(),
                message,
            });
        }

        parse_ocr_response(&body)
    }
}

fn upstream_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| "unknown error".to_string())
}

fn parse_ocr_response(body: &str) -> Result<OcrOutput> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        ReceiptError::ResponseShape(format!("OCR API returned malformed JSON: {e}"))
    })?;

    let fields = value
        .get("images")
        .and_then(Value::as_array)
        .and_then(|images| images.first())
        .ok_or_else(|| ReceiptError::ResponseShape("No text found in OCR response".to_string()))?
        .get("fields")
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| {
            ReceiptError::ResponseShape("OCR response image has no fields list".to_string())
        })?;

    let text = fields
        .iter()
        .map(|field| field.get("inferText").and_then(Value::as_str).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(OcrOutput { text, fields })
}
