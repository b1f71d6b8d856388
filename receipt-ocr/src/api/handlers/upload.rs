use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;

use crate::api::dto::UploadResponse;
use crate::api::extractors::read_receipt_upload;
use crate::api::state::AppState;
use crate::error::Result;

/// `POST /upload`
///
/// Stores the `receipt` file and reports its generated name. No OCR runs and
/// the file is kept on disk.
pub async fn upload_receipt(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let upload = read_receipt_upload(multipart, state.config.server.max_upload_bytes).await?;

    let file = state.store.store(&upload.file_name, &upload.bytes).await?;
    let filename = file.persist();
    tracing::info!(%filename, content_type = %upload.content_type, "File uploaded");

    Ok(Json(UploadResponse::stored(filename)))
}
