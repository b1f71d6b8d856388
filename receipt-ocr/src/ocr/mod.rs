//! OCR (Optical Character Recognition) Module
//!
//! Sends an uploaded receipt to an external text-extraction API and turns the
//! per-field results into one block of text.
//!
//! # Architecture
//!
//! - `OcrApiClient` speaks the provider's HTTP contract: a multipart request
//!   with a JSON `message` part plus the raw file, answered by
//!   `images[0].fields[].inferText`.
//! - `OcrProvider` owns the backend choice. Without an invoke URL and secret it
//!   stays `Unavailable` and every call fails with a configuration error
//!   before touching the network.
//!
//! # Configuration
//!
//! OCR behavior is controlled via `OcrConfig` (see `config.rs`):
//! - `api_url`: provider invoke URL
//! - `secret_key`: sent as the `X-OCR-SECRET` header
//! - `timeout_secs`: request timeout for API calls
//!
//! # Usage
//!
//! ```rust,ignore
//! let ocr = OcrProvider::new(&config.ocr)?;
//! let output = ocr.extract_text(stored_file.path()).await?;
//! ```

mod api;
mod provider;

pub use api::{format_for_path, generate_request_id, OcrApiClient, OcrOutput};
pub use provider::OcrProvider;
