//! Theme entity model.

use escape_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `themes` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Theme {
    pub id: DbId,
    pub title: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub difficulty: i32,
    pub scariness: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
