// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error taxonomy.
///
/// Every handler path terminates in exactly one of these variants; the
/// router turns it into the single `{"error": "<message>"}` body the API
/// promises. External-call failures surface immediately with no retry.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Duplicate username at sign-up. The original API reported this as a
    /// plain bad request, so the status stays 400 rather than 409.
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials or an invalid/expired/absent token.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Refresh attempted while more than the grace window remains.
    #[error("token not yet eligible for renewal")]
    RefreshTooEarly,

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RefreshTooEarly
            | AppError::Database(_)
            | AppError::Cache(_)
            | AppError::Json(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
