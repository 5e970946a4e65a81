pub mod health;
pub mod themes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /theme            list, create
/// /themes/{id}      update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(themes::router())
}
