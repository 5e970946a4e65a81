//! Request body extractor for theme submissions.
//!
//! Theme fields may arrive as `multipart/form-data` (the only encoding that
//! can carry an image), `application/x-www-form-urlencoded`, or a JSON
//! object. All three are flattened into a [`ThemeInput`] of raw text so the
//! theme service validates them the same way.

use std::collections::HashMap;

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::{Form, Json};
use escape_core::error::CoreError;
use escape_core::theme::{ThemeInput, THEME_FIELDS};
use escape_storage::UploadedAsset;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Multipart field carrying the theme image.
pub const IMAGE_FIELD: &str = "image";

/// Content type recorded when the client did not send one for the image part.
const DEFAULT_IMAGE_CONTENT_TYPE: &str = "application/octet-stream";

/// Parsed theme fields plus the optional image upload.
#[derive(Debug, Default)]
pub struct ThemeSubmission {
    pub input: ThemeInput,
    pub image: Option<UploadedAsset>,
}

impl<S> FromRequest<S> for ThemeSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);

        let Some(content_type) = content_type else {
            return Ok(Self::default());
        };

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| body_rejection(e.status(), e.body_text()))?;
            read_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let Json(body) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|e| body_rejection(e.status(), e.body_text()))?;
            Ok(Self {
                input: input_from_json(body)?,
                image: None,
            })
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| body_rejection(e.status(), e.body_text()))?;
            let mut input = ThemeInput::default();
            for (name, value) in pairs {
                input.set(&name, value);
            }
            Ok(Self { input, image: None })
        } else {
            Err(AppError::BadRequest(format!(
                "Unsupported content type '{content_type}'"
            )))
        }
    }
}

/// Map an axum body rejection to [`AppError`], keeping the 413 of an
/// oversized body.
fn body_rejection(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(message)
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<ThemeSubmission, AppError> {
    let mut submission = ThemeSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| body_rejection(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == IMAGE_FIELD {
            let file_name = field.file_name().unwrap_or(IMAGE_FIELD).to_string();
            let content_type = field
                .content_type()
                .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| body_rejection(e.status(), e.body_text()))?;

            let asset = UploadedAsset {
                file_name,
                content_type,
                bytes,
            };
            // Browsers submit an empty part for an untouched file input.
            if !asset.is_empty() {
                submission.image = Some(asset);
            }
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| body_rejection(e.status(), e.body_text()))?;
        if !submission.input.set(&name, text) {
            tracing::debug!(field = %name, "Ignoring unknown form field");
        }
    }

    Ok(submission)
}

/// Flatten a JSON object into raw field text. Numbers and booleans keep
/// their JSON spelling; nested values on a theme field are rejected.
fn input_from_json(body: Map<String, Value>) -> Result<ThemeInput, AppError> {
    let mut input = ThemeInput::default();

    for (name, value) in body {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                match THEME_FIELDS.iter().copied().find(|f| *f == name) {
                    Some(field) => return Err(CoreError::invalid(field).into()),
                    None => continue,
                }
            }
        };
        input.set(&name, text);
    }

    Ok(input)
}
