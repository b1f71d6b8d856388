use serde::Serialize;
use serde_json::Value;

use crate::services::ReceiptScan;

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
}

impl UploadResponse {
    pub fn stored(filename: String) -> Self {
        Self {
            success: true,
            message: "File uploaded successfully.".to_string(),
            filename,
        }
    }
}

/// Body of a successful `POST /ocr`.
///
/// `formattedText` and `gptError` are always present; exactly one of them is
/// `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub success: bool,
    pub raw_text: String,
    pub formatted_text: Option<String>,
    pub gpt_error: Option<String>,
    pub fields: Vec<Value>,
}

impl From<ReceiptScan> for ScanResponse {
    fn from(scan: ReceiptScan) -> Self {
        Self {
            success: true,
            raw_text: scan.raw_text,
            formatted_text: scan.formatted_text,
            gpt_error: scan.format_error,
            fields: scan.fields,
        }
    }
}
