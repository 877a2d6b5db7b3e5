use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::dto::ErrorResponse;
use crate::errors::AppError;

/// Handler error: wraps [`AppError`] and decides the HTTP status.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, msg),
            err @ (AppError::Storage(_)
            | AppError::CorruptValue { .. }
            | AppError::Migration(_)) => {
                tracing::error!(error = %err, "storage failure");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Storage unavailable")
            }
            err => {
                tracing::error!(error = %err, "request failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}
