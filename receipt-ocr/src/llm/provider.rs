use tracing::{info, warn};

use crate::config::LlmConfig;
use crate::error::{ReceiptError, Result};
use crate::llm::api::LlmApiClient;
use crate::llm::prompts::receipt_summary_prompt;

#[derive(Debug, Clone)]
enum LlmBackend {
    Api { client: LlmApiClient },
    Unavailable { reason: String },
}

#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
}

impl LlmProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let backend = match LlmApiClient::new(config) {
            Ok(client) => {
                info!(model = %client.model(), "LLM backend initialized");
                LlmBackend::Api { client }
            }
            Err(ReceiptError::ConfigurationMissing(reason)) => {
                warn!("LLM unavailable: {} is not configured", reason);
                LlmBackend::Unavailable { reason }
            }
            Err(e) => return Err(e),
        };

        Ok(Self { backend })
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    /// Reformat raw OCR text into the labeled receipt summary.
    ///
    /// Any text the model returns is accepted; the section layout is asked
    /// for in the prompt but not checked here.
    pub async fn format_receipt(&self, raw_text: &str) -> Result<String> {
        match &self.backend {
            LlmBackend::Api { client } => client.complete(&receipt_summary_prompt(raw_text)).await,
            LlmBackend::Unavailable { reason } => {
                Err(ReceiptError::ConfigurationMissing(reason.clone()))
            }
        }
    }
}
