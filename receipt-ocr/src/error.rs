use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Body text for failures whose details must stay in the logs.
pub const GENERIC_SERVER_ERROR: &str = "server error";

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} is not configured")]
    ConfigurationMissing(String),

    #[error("{service} API error: {status} - {message}")]
    UpstreamHttp {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    ResponseShape(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ReceiptError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ReceiptError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client. Provider failures are passed
    /// through, local faults collapse to [`GENERIC_SERVER_ERROR`].
    pub fn public_message(&self) -> String {
        match self {
            ReceiptError::Validation(msg) => msg.clone(),
            ReceiptError::Io(_) | ReceiptError::Internal(_) => GENERIC_SERVER_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ReceiptError {
    fn into_response(self) -> Response {
        if matches!(self, ReceiptError::Io(_) | ReceiptError::Internal(_)) {
            tracing::error!(error = %self, "Request failed with an internal error");
        }

        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": self.public_message(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
