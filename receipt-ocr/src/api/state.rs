use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::llm::LlmProvider;
use crate::ocr::OcrProvider;
use crate::services::ReceiptService;
use crate::storage::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: UploadStore,
    pub receipts: ReceiptService,
}

impl AppState {
    pub fn new(config: Config, store: UploadStore, ocr: OcrProvider, llm: LlmProvider) -> Self {
        Self {
            config: Arc::new(config),
            store,
            receipts: ReceiptService::new(ocr, llm),
        }
    }

    /// Build every provider from `config`. Missing credentials leave the
    /// matching provider unavailable instead of failing here.
    pub fn from_config(config: Config) -> Result<Self> {
        let store = UploadStore::new(config.server.upload_dir.clone());
        let ocr = OcrProvider::new(&config.ocr)?;
        let llm = LlmProvider::new(&config.llm)?;
        Ok(Self::new(config, store, ocr, llm))
    }
}
