//! Theme store gateway.
//!
//! [`ThemeStore`] is the seam between the theme service and persistence. The
//! PostgreSQL implementation delegates to [`ThemeRepo`] and turns a
//! zero-row update or delete into [`StoreError::NotFound`], so callers can
//! tell a missing theme apart from a failing backend.

use async_trait::async_trait;
use escape_core::theme::{ThemeFields, ThemeUpdate};
use escape_core::types::DbId;

use crate::models::theme::Theme;
use crate::repositories::ThemeRepo;
use crate::DbPool;

/// Errors returned by a [`ThemeStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No theme row matched the given ID.
    #[error("Theme with id {id} not found")]
    NotFound { id: DbId },

    /// The backend rejected or failed the query.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// CRUD access to persisted themes. No business validation happens here.
#[async_trait]
pub trait ThemeStore: Send + Sync {
    /// All themes.
    async fn list_all(&self) -> Result<Vec<Theme>, StoreError>;

    /// Insert a theme and return its generated ID.
    async fn insert(&self, fields: &ThemeFields, image_url: Option<&str>)
        -> Result<DbId, StoreError>;

    /// Overwrite the mutable fields of a theme, returning the affected row count.
    async fn update(&self, id: DbId, changes: &ThemeUpdate) -> Result<u64, StoreError>;

    /// Remove a theme, returning the affected row count.
    async fn delete(&self, id: DbId) -> Result<u64, StoreError>;

    /// Round-trip to the backend, for health reporting.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// [`ThemeStore`] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgThemeStore {
    pool: DbPool,
}

impl PgThemeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThemeStore for PgThemeStore {
    async fn list_all(&self) -> Result<Vec<Theme>, StoreError> {
        Ok(ThemeRepo::list(&self.pool).await?)
    }

    async fn insert(
        &self,
        fields: &ThemeFields,
        image_url: Option<&str>,
    ) -> Result<DbId, StoreError> {
        Ok(ThemeRepo::insert(&self.pool, fields, image_url).await?)
    }

    async fn update(&self, id: DbId, changes: &ThemeUpdate) -> Result<u64, StoreError> {
        affected_or_not_found(id, ThemeRepo::update(&self.pool, id, changes).await?)
    }

    async fn delete(&self, id: DbId) -> Result<u64, StoreError> {
        affected_or_not_found(id, ThemeRepo::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

/// Map a zero affected-row count to [`StoreError::NotFound`].
pub fn affected_or_not_found(id: DbId, rows: u64) -> Result<u64, StoreError> {
    if rows == 0 {
        tracing::debug!(theme_id = id, "No theme row matched");
        Err(StoreError::NotFound { id })
    } else {
        Ok(rows)
    }
}
