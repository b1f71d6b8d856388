use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::api::dto::ScanResponse;
use crate::api::extractors::read_receipt_upload;
use crate::api::state::AppState;
use crate::error::Result;
use crate::services::ScanStage;

/// `POST /ocr`
///
/// Stores the `receipt` file for the duration of the request, runs OCR and
/// formatting on it, and returns both texts. OCR failures answer 500; a
/// formatting failure still answers 200 with `gptError` set.
pub async fn scan_receipt(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ScanResponse>> {
    info!(stage = %ScanStage::Received, "OCR request received");
    let upload = read_receipt_upload(multipart, state.config.server.max_upload_bytes).await?;
    info!(
        stage = %ScanStage::Validated,
        file_name = %upload.file_name,
        content_type = %upload.content_type,
        size = upload.bytes.len(),
        "Upload validated"
    );

    let file = state.store.store(&upload.file_name, &upload.bytes).await?;
    let scan = state.receipts.scan(file).await?;

    Ok(Json(ScanResponse::from(scan)))
}
