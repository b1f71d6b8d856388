use axum::extract::multipart::{Multipart, MultipartRejection};

use crate::error::{ReceiptError, Result};
use crate::storage::file_extension;

/// Multipart field that carries the receipt file.
pub const RECEIPT_FIELD: &str = "receipt";

/// Slack on top of the file size limit for multipart boundaries and headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

const ALLOWED_TYPES: [&str; 4] = ["jpeg", "jpg", "png", "pdf"];

const NO_FILE_MESSAGE: &str = "No file was uploaded.";

/// A validated receipt upload held in memory, not yet stored.
#[derive(Debug)]
pub struct ReceiptUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Whether the extension and declared content type both name an allowed
/// receipt format. A missing content type is guessed from the file name.
pub fn is_allowed_type(file_name: &str, content_type: Option<&str>) -> bool {
    let extension = file_extension(file_name);
    let extension_ok = ALLOWED_TYPES
        .iter()
        .any(|allowed| extension.trim_start_matches('.') == *allowed);

    let mime = content_type
        .map(str::to_lowercase)
        .unwrap_or_else(|| {
            mime_guess::from_path(file_name)
                .first_or_octet_stream()
                .to_string()
        });
    let mime_ok = ALLOWED_TYPES.iter().any(|allowed| mime.contains(allowed));

    extension_ok && mime_ok
}

/// Pull the `receipt` file out of a multipart body.
///
/// Type checks happen on the part headers before any bytes are read, and the
/// size limit is enforced while streaming, so rejected uploads are never
/// buffered in full or written to disk.
pub async fn read_receipt_upload(
    multipart: std::result::Result<Multipart, MultipartRejection>,
    max_bytes: usize,
) -> Result<ReceiptUpload> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(%rejection, "Request is not a multipart upload");
        ReceiptError::validation(NO_FILE_MESSAGE)
    })?;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ReceiptError::validation(format!("Failed to read upload: {}", e.body_text())))?
    {
        if field.name() != Some(RECEIPT_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);

        if !is_allowed_type(&file_name, content_type.as_deref()) {
            return Err(ReceiptError::validation(
                "Unsupported file type. Allowed types: jpeg, jpg, png, pdf.",
            ));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(|e| {
            ReceiptError::validation(format!("Failed to read upload: {}", e.body_text()))
        })? {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(ReceiptError::validation(format!(
                    "File too large (max {max_bytes} bytes)."
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        let content_type = content_type.unwrap_or_else(|| {
            mime_guess::from_path(&file_name)
                .first_or_octet_stream()
                .to_string()
        });

        return Ok(ReceiptUpload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(ReceiptError::validation(NO_FILE_MESSAGE))
}
