use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::mail::MailError;

/// Body returned for any 500 whose details are withheld from the caller.
pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Delivery failure reported with a generic message only.
    #[error("Mail delivery failed: {0}")]
    Mail(#[from] MailError),

    /// Delivery failure whose error text is returned to the caller.
    #[error("Mail delivery failed: {0}")]
    MailDetailed(MailError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Mail(_) | AppError::MailDetailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::MissingFields => json!({
                "success": false,
                "message": "Missing required fields",
            }),
            AppError::InvalidBody(msg) => json!({
                "success": false,
                "message": msg,
            }),
            AppError::Mail(_) => json!({
                "success": false,
                "error": GENERIC_FAILURE,
            }),
            AppError::MailDetailed(err) => json!({
                "success": false,
                "error": err.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
