//! Repository for the `themes` table.

use escape_core::theme::{ThemeFields, ThemeUpdate};
use escape_core::types::DbId;
use sqlx::PgPool;

use crate::models::theme::Theme;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, title, location, description, difficulty, scariness, \
    image_url, created_at, updated_at";

/// Provides CRUD operations for themes.
pub struct ThemeRepo;

impl ThemeRepo {
    /// List every theme, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Theme>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM themes ORDER BY id");
        sqlx::query_as::<_, Theme>(&query).fetch_all(pool).await
    }

    /// Insert a new theme, returning the generated ID.
    pub async fn insert(
        pool: &PgPool,
        fields: &ThemeFields,
        image_url: Option<&str>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO themes (title, location, description, difficulty, scariness, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(&fields.title)
        .bind(&fields.location)
        .bind(&fields.description)
        .bind(fields.difficulty)
        .bind(fields.scariness)
        .bind(image_url)
        .fetch_one(pool)
        .await
    }

    /// Overwrite every mutable column except `image_url`.
    ///
    /// Returns the number of rows affected (0 when the ID does not exist).
    pub async fn update(pool: &PgPool, id: DbId, changes: &ThemeUpdate) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE themes SET \
                 title = $2, \
                 location = $3, \
                 description = $4, \
                 difficulty = $5, \
                 scariness = $6, \
                 updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.location)
        .bind(&changes.description)
        .bind(changes.difficulty)
        .bind(changes.scariness)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a theme by ID.
    ///
    /// Returns the number of rows affected (0 when the ID does not exist).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM themes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
