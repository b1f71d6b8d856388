//! Receipt scanning service.
//!
//! Accepts a receipt image or PDF over HTTP, extracts its text with an
//! external OCR API and asks a chat-completion model to lay the text out as
//! an expense-report summary.

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod ocr;
pub mod services;
pub mod storage;
