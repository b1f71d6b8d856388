use std::fmt;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;
use crate::llm::LlmProvider;
use crate::ocr::OcrProvider;
use crate::storage::TransientFile;

/// Lifecycle of one `/ocr` request, used for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStage {
    Received,
    Validated,
    OcrRunning,
    OcrFailed,
    FormattingRunning,
    Completed,
}

impl fmt::Display for ScanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::OcrRunning => "ocr_running",
            Self::OcrFailed => "ocr_failed",
            Self::FormattingRunning => "formatting_running",
            Self::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful OCR pass. Formatting may still have failed, in
/// which case `formatted_text` is `None` and `format_error` says why.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptScan {
    pub raw_text: String,
    pub formatted_text: Option<String>,
    pub format_error: Option<String>,
    pub fields: Vec<Value>,
}

#[derive(Clone)]
pub struct ReceiptService {
    ocr: OcrProvider,
    llm: LlmProvider,
}

impl ReceiptService {
    pub fn new(ocr: OcrProvider, llm: LlmProvider) -> Self {
        Self { ocr, llm }
    }

    /// OCR the stored upload, then format the text.
    ///
    /// The file is released as soon as OCR resolves, whatever the outcome.
    /// An OCR failure is returned as the error; a formatting failure is folded
    /// into the returned [`ReceiptScan`].
    pub async fn scan(&self, file: TransientFile) -> Result<ReceiptScan> {
        info!(file = %file.stored_name(), stage = %ScanStage::OcrRunning, "Starting OCR");
        let ocr_result = self.ocr.extract_text(file.path()).await;
        file.release().await;

        let output = match ocr_result {
            Ok(output) => output,
            Err(e) => {
                warn!(stage = %ScanStage::OcrFailed, error = %e, "OCR failed");
                return Err(e);
            }
        };

        info!(
            stage = %ScanStage::FormattingRunning,
            lines = output.fields.len(),
            "Formatting OCR text"
        );
        let (formatted_text, format_error) = match self.llm.format_receipt(&output.text).await {
            Ok(text) => (Some(text), None),
            Err(e) => {
                warn!(error = %e, "Formatting failed, returning raw OCR text only");
                (None, Some(e.public_message()))
            }
        };

        info!(stage = %ScanStage::Completed, formatted = formatted_text.is_some(), "Receipt scan finished");
        Ok(ReceiptScan {
            raw_text: output.text,
            formatted_text,
            format_error,
            fields: output.fields,
        })
    }
}
