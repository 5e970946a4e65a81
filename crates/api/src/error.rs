use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use escape_core::error::CoreError;
use escape_db::StoreError;
use escape_storage::AssetStoreError;
use serde_json::json;

use crate::response::ApiResponse;

/// `errorCode` values carried by failure envelopes.
pub mod codes {
    pub const INVALID_PARAMETER_FORMAT: &str = "INVALID_PARAMETER_FORMAT";
    pub const MISSING_IMAGE: &str = "MISSING_IMAGE";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const PAYLOAD_TOO_LARGE: &str = "PAYLOAD_TOO_LARGE";
    pub const THEME_NOT_FOUND: &str = "THEME_NOT_FOUND";
    pub const DB_ERROR: &str = "DB_ERROR";
    pub const BACKEND_TIMEOUT: &str = "BACKEND_TIMEOUT";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

/// Application-level error type for the theme service and HTTP handlers.
///
/// Wraps the domain, persistence, and asset storage errors and converts each
/// into an [`ApiResponse`] failure envelope. Backend details are logged,
/// never returned to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid client input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A theme store failure, including a missing row.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The object store did not accept an upload.
    #[error(transparent)]
    Asset(#[from] AssetStoreError),

    /// A backend call exceeded the configured timeout.
    #[error("{backend} did not respond in time")]
    Timeout { backend: &'static str },

    /// A malformed request body or unsupported content type.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured upload limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

/// Convenience type alias for service and handler results.
pub type AppResult<T> = Result<T, AppError>;

impl From<AppError> for ApiResponse {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Core(CoreError::InvalidParameter { field }) => ApiResponse::error(
                StatusCode::BAD_REQUEST,
                "Invalid request parameter format",
                codes::INVALID_PARAMETER_FORMAT,
                Some(json!({ "field": field })),
            ),
            AppError::Core(CoreError::MissingImage) => ApiResponse::error(
                StatusCode::BAD_REQUEST,
                "An image file is required",
                codes::MISSING_IMAGE,
                None,
            ),
            AppError::Store(StoreError::NotFound { id }) => ApiResponse::error(
                StatusCode::NOT_FOUND,
                format!("Theme with id {id} not found"),
                codes::THEME_NOT_FOUND,
                Some(json!({ "id": id })),
            ),
            AppError::Store(StoreError::Database(e)) => {
                tracing::error!(error = %e, "Database error");
                ApiResponse::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed",
                    codes::DB_ERROR,
                    None,
                )
            }
            AppError::Asset(e) => {
                tracing::error!(error = %e, "Asset store error");
                ApiResponse::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Image upload failed",
                    codes::INTERNAL_SERVER_ERROR,
                    None,
                )
            }
            AppError::Timeout { backend } => {
                tracing::error!(backend, "Backend timeout");
                ApiResponse::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Backend did not respond in time",
                    codes::BACKEND_TIMEOUT,
                    None,
                )
            }
            AppError::BadRequest(msg) => {
                ApiResponse::error(StatusCode::BAD_REQUEST, msg, codes::BAD_REQUEST, None)
            }
            AppError::PayloadTooLarge(msg) => ApiResponse::error(
                StatusCode::PAYLOAD_TOO_LARGE,
                msg,
                codes::PAYLOAD_TOO_LARGE,
                None,
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiResponse::from(self).into_response()
    }
}
