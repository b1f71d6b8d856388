use std::path::Path;

use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{ReceiptError, Result};

use super::api::{OcrApiClient, OcrOutput};

#[derive(Clone, Debug)]
enum OcrBackend {
    Api { client: OcrApiClient },
    Unavailable { reason: String },
}

#[derive(Clone, Debug)]
pub struct OcrProvider {
    backend: OcrBackend,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let backend = match OcrApiClient::new(config) {
            Ok(client) => {
                info!(api_url = %client.api_url(), "OCR API backend initialized");
                OcrBackend::Api { client }
            }
            Err(ReceiptError::ConfigurationMissing(reason)) => {
                warn!("OCR backend unavailable: {} is not configured", reason);
                OcrBackend::Unavailable { reason }
            }
            Err(e) => return Err(e),
        };

        Ok(Self { backend })
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, OcrBackend::Unavailable { .. })
    }

    /// Run OCR on the file at `file_path`. Never reaches the network when the
    /// provider is not configured.
    pub async fn extract_text(&self, file_path: &Path) -> Result<OcrOutput> {
        match &self.backend {
            OcrBackend::Api { client } => client.extract_text(file_path).await,
            OcrBackend::Unavailable { reason } => {
                Err(ReceiptError::ConfigurationMissing(reason.clone()))
            }
        }
    }
}
