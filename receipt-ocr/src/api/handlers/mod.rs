pub mod ocr;
pub mod upload;

use axum::http::StatusCode;

/// `GET /favicon.ico` has no icon to serve.
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
