//! Theme service: validation and orchestration over the two gateways.
//!
//! Create runs in a fixed order: validate fields, require an image when
//! configured to, upload the image, then insert the row carrying the
//! confirmed URL. A failed upload therefore never leaves a row behind.
//!
//! Every public operation returns an [`ApiResponse`]; backend failures are
//! converted here and never reach the HTTP layer as errors.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use escape_core::error::CoreError;
use escape_core::theme::{parse_theme_id, ThemeInput};
use escape_core::types::DbId;
use escape_db::ThemeStore;
use escape_storage::{AssetStore, UploadedAsset};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;

/// Default upper bound for one backend call.
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(10);

const THEME_STORE: &str = "theme store";
const ASSET_STORE: &str = "asset store";

/// Payload of a successful create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTheme {
    pub inserted_id: DbId,
    #[serde(rename = "image_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Payload of a successful update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedTheme {
    pub updated_id: DbId,
}

/// Payload of a successful delete.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTheme {
    pub deleted_id: DbId,
}

/// Composes the theme store and asset store behind the theme endpoints.
pub struct ThemeService {
    store: Arc<dyn ThemeStore>,
    assets: Arc<dyn AssetStore>,
    backend_timeout: Duration,
    require_image: bool,
}

impl ThemeService {
    pub fn new(store: Arc<dyn ThemeStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            store,
            assets,
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
            require_image: false,
        }
    }

    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout;
        self
    }

    /// Reject creates that carry no image.
    pub fn with_required_image(mut self, required: bool) -> Self {
        self.require_image = required;
        self
    }

    /// List every theme.
    pub async fn get_themes(&self) -> ApiResponse {
        match self.bounded(THEME_STORE, self.store.list_all()).await {
            Ok(themes) => ApiResponse::ok("Themes retrieved", &themes),
            Err(e) => e.into(),
        }
    }

    /// Validate and persist a new theme, uploading `image` first if present.
    pub async fn create_theme(
        &self,
        input: ThemeInput,
        image: Option<UploadedAsset>,
    ) -> ApiResponse {
        match self.try_create(input, image).await {
            Ok(created) => ApiResponse::created("Theme created", &created),
            Err(e) => e.into(),
        }
    }

    /// Overwrite the fields of the theme identified by `raw_id`.
    pub async fn update_theme(&self, raw_id: &str, input: ThemeInput) -> ApiResponse {
        match self.try_update(raw_id, input).await {
            Ok(updated) => ApiResponse::ok("Theme updated", &updated),
            Err(e) => e.into(),
        }
    }

    /// Remove the theme identified by `raw_id`.
    pub async fn delete_theme(&self, raw_id: &str) -> ApiResponse {
        match self.try_delete(raw_id).await {
            Ok(deleted) => ApiResponse::ok("Theme deleted", &deleted),
            Err(e) => e.into(),
        }
    }

    /// Whether the theme store answers within the backend timeout.
    pub async fn store_healthy(&self) -> bool {
        self.bounded(THEME_STORE, self.store.ping()).await.is_ok()
    }

    async fn try_create(
        &self,
        input: ThemeInput,
        image: Option<UploadedAsset>,
    ) -> AppResult<CreatedTheme> {
        let fields = input.validate_for_create()?;

        if self.require_image && image.is_none() {
            return Err(CoreError::MissingImage.into());
        }

        let image_url = match image {
            Some(asset) => {
                let stored = self.bounded(ASSET_STORE, self.assets.store(asset)).await?;
                Some(stored.url)
            }
            None => None,
        };

        let id = self
            .bounded(THEME_STORE, self.store.insert(&fields, image_url.as_deref()))
            .await?;

        tracing::info!(
            theme_id = id,
            title = %fields.title,
            has_image = image_url.is_some(),
            "Theme created",
        );

        Ok(CreatedTheme {
            inserted_id: id,
            image_url,
        })
    }

    async fn try_update(&self, raw_id: &str, input: ThemeInput) -> AppResult<UpdatedTheme> {
        let id = parse_theme_id(raw_id)?;
        let changes = input.into_update()?;

        self.bounded(THEME_STORE, self.store.update(id, &changes))
            .await?;

        tracing::info!(theme_id = id, "Theme updated");

        Ok(UpdatedTheme { updated_id: id })
    }

    async fn try_delete(&self, raw_id: &str) -> AppResult<DeletedTheme> {
        let id = parse_theme_id(raw_id)?;

        self.bounded(THEME_STORE, self.store.delete(id)).await?;

        tracing::info!(theme_id = id, "Theme deleted");

        Ok(DeletedTheme { deleted_id: id })
    }

    /// Await a backend call, failing with [`AppError::Timeout`] once the
    /// backend timeout elapses.
    async fn bounded<T, E>(
        &self,
        backend: &'static str,
        call: impl Future<Output = Result<T, E>>,
    ) -> AppResult<T>
    where
        AppError: From<E>,
    {
        match tokio::time::timeout(self.backend_timeout, call).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => {
                tracing::warn!(
                    backend,
                    timeout = ?self.backend_timeout,
                    "Backend call timed out",
                );
                Err(AppError::Timeout { backend })
            }
        }
    }
}
