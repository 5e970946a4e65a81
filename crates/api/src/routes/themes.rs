//! Route definitions for escape room themes.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::themes;
use crate::state::AppState;

/// Theme routes, mounted under `/api`.
///
/// ```text
/// GET    /theme          -> list_themes
/// POST   /theme          -> create_theme
/// PUT    /themes/{id}    -> update_theme
/// DELETE /themes/{id}    -> delete_theme
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/theme", get(themes::list_themes).post(themes::create_theme))
        .route(
            "/themes/{id}",
            put(themes::update_theme).delete(themes::delete_theme),
        )
}
