//! Handlers for escape room themes.
//!
//! Each handler forwards to [`ThemeService`](crate::service::ThemeService),
//! which already answers with a complete envelope.

use axum::extract::{Path, State};
use escape_core::theme::parse_theme_id;

use crate::error::AppError;
use crate::form::ThemeSubmission;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/theme
pub async fn list_themes(State(state): State<AppState>) -> ApiResponse {
    state.themes.get_themes().await
}

/// POST /api/theme
///
/// Accepts multipart form fields with an optional `image` file, or plain
/// JSON / urlencoded fields.
pub async fn create_theme(
    State(state): State<AppState>,
    submission: ThemeSubmission,
) -> ApiResponse {
    state
        .themes
        .create_theme(submission.input, submission.image)
        .await
}

/// PUT /api/themes/{id}
///
/// Overwrites the theme's fields. An uploaded image is ignored; `image_url`
/// never changes through this endpoint.
///
/// A malformed id is reported ahead of any body rejection.
pub async fn update_theme(
    State(state): State<AppState>,
    Path(id): Path<String>,
    submission: Result<ThemeSubmission, AppError>,
) -> ApiResponse {
    let submission = match submission {
        Ok(submission) => submission,
        Err(rejection) => {
            return match parse_theme_id(&id) {
                Ok(_) => rejection.into(),
                Err(e) => AppError::from(e).into(),
            };
        }
    };
    if submission.image.is_some() {
        tracing::debug!(theme_id = %id, "Ignoring image uploaded with theme update");
    }
    state.themes.update_theme(&id, submission.input).await
}

/// DELETE /api/themes/{id}
pub async fn delete_theme(State(state): State<AppState>, Path(id): Path<String>) -> ApiResponse {
    state.themes.delete_theme(&id).await
}
