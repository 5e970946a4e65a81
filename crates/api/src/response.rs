//! Uniform response envelope.
//!
//! Every endpoint answers with the same JSON shape:
//!
//! ```text
//! { "status": 201, "success": true, "message": "...", "data": {...}, "errorCode": null }
//! ```
//!
//! On failure `data` carries optional structured detail such as
//! `{ "field": "title" }` and `errorCode` names the failure class.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::error::codes;

/// Success/error envelope returned by every theme operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status: u16,
    pub success: bool,
    pub message: String,
    pub data: Value,
    pub error_code: Option<&'static str>,
}

impl ApiResponse {
    /// Successful envelope carrying `data`.
    ///
    /// Falls back to a 500 envelope if `data` cannot be serialized.
    pub fn success(status: StatusCode, message: impl Into<String>, data: &impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self {
                status: status.as_u16(),
                success: true,
                message: message.into(),
                data,
                error_code: None,
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response data");
                Self::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    codes::INTERNAL_SERVER_ERROR,
                    None,
                )
            }
        }
    }

    /// 200 OK.
    pub fn ok(message: impl Into<String>, data: &impl Serialize) -> Self {
        Self::success(StatusCode::OK, message, data)
    }

    /// 201 Created.
    pub fn created(message: impl Into<String>, data: &impl Serialize) -> Self {
        Self::success(StatusCode::CREATED, message, data)
    }

    /// Failure envelope with an error code and optional detail.
    pub fn error(
        status: StatusCode,
        message: impl Into<String>,
        error_code: &'static str,
        detail: Option<Value>,
    ) -> Self {
        Self {
            status: status.as_u16(),
            success: false,
            message: message.into(),
            data: detail.unwrap_or(Value::Null),
            error_code: Some(error_code),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
