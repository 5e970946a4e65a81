#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use escape_api::app::build_app;
use escape_api::config::ServerConfig;
use escape_api::service::ThemeService;
use escape_api::state::AppState;
use escape_core::theme::{ThemeFields, ThemeUpdate};
use escape_core::types::DbId;
use escape_db::models::theme::Theme;
use escape_db::store::affected_or_not_found;
use escape_db::{StoreError, ThemeStore};
use escape_storage::{AssetStore, AssetStoreError, StoredAsset, UploadedAsset};

// ---------------------------------------------------------------------------
// In-memory theme store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryRows {
    next_id: DbId,
    themes: BTreeMap<DbId, Theme>,
}

/// `ThemeStore` holding rows in memory. Can be switched into a failing or
/// slow mode to exercise error paths.
#[derive(Default)]
pub struct MemoryThemeStore {
    rows: Mutex<MemoryRows>,
    fail: Mutex<bool>,
    delay: Mutex<Option<Duration>>,
}

impl MemoryThemeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn themes(&self) -> Vec<Theme> {
        self.rows.lock().unwrap().themes.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().themes.len()
    }

    async fn enter(&self) -> Result<(), StoreError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail.lock().unwrap() {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl ThemeStore for MemoryThemeStore {
    async fn list_all(&self) -> Result<Vec<Theme>, StoreError> {
        self.enter().await?;
        Ok(self.themes())
    }

    async fn insert(
        &self,
        fields: &ThemeFields,
        image_url: Option<&str>,
    ) -> Result<DbId, StoreError> {
        self.enter().await?;
        let mut rows = self.rows.lock().unwrap();
        rows.next_id += 1;
        let id = rows.next_id;
        let now = chrono::Utc::now();
        rows.themes.insert(
            id,
            Theme {
                id,
                title: fields.title.clone(),
                location: fields.location.clone(),
                description: fields.description.clone(),
                difficulty: fields.difficulty,
                scariness: fields.scariness,
                image_url: image_url.map(str::to_string),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: DbId, changes: &ThemeUpdate) -> Result<u64, StoreError> {
        self.enter().await?;
        let mut rows = self.rows.lock().unwrap();
        let Some(theme) = rows.themes.get_mut(&id) else {
            return affected_or_not_found(id, 0);
        };
        // Mirrors the NOT NULL constraints on the real table.
        let (Some(title), Some(difficulty)) = (changes.title.clone(), changes.difficulty) else {
            return Err(StoreError::Database(sqlx::Error::Protocol(
                "null value violates not-null constraint".into(),
            )));
        };
        theme.title = title;
        theme.location = changes.location.clone();
        theme.description = changes.description.clone();
        theme.difficulty = difficulty;
        theme.scariness = changes.scariness;
        theme.updated_at = chrono::Utc::now();
        affected_or_not_found(id, 1)
    }

    async fn delete(&self, id: DbId) -> Result<u64, StoreError> {
        self.enter().await?;
        let removed = self.rows.lock().unwrap().themes.remove(&id);
        affected_or_not_found(id, u64::from(removed.is_some()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.enter().await
    }
}

// ---------------------------------------------------------------------------
// In-memory asset store
// ---------------------------------------------------------------------------

/// `AssetStore` that records uploads instead of writing them anywhere.
#[derive(Default)]
pub struct MemoryAssetStore {
    uploads: Mutex<Vec<UploadedAsset>>,
    fail: Mutex<bool>,
    delay: Mutex<Option<Duration>>,
}

impl MemoryAssetStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn uploads(&self) -> Vec<UploadedAsset> {
        self.uploads.lock().unwrap().clone()
    }
}

pub const ASSET_BASE_URL: &str = "https://rooms.s3.ap-northeast-2.amazonaws.com";

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn store(&self, asset: UploadedAsset) -> Result<StoredAsset, AssetStoreError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let key = escape_storage::key::object_key("themes", &asset.file_name);
        if *self.fail.lock().unwrap() {
            return Err(AssetStoreError::Upload {
                key,
                reason: "connection reset".into(),
            });
        }
        let url = escape_storage::key::public_url(Some(ASSET_BASE_URL), "rooms", "ap-northeast-2", &key);
        self.uploads.lock().unwrap().push(asset);
        Ok(StoredAsset { key, url })
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        backend_timeout_secs: 10,
        max_upload_bytes: 1024 * 1024,
        require_theme_image: false,
    }
}

/// A theme service over the given fakes.
pub fn service(store: &Arc<MemoryThemeStore>, assets: &Arc<MemoryAssetStore>) -> ThemeService {
    ThemeService::new(store.clone(), assets.clone())
}

/// Build the full application router around `service`, with the same
/// middleware stack production uses.
pub fn build_test_app(service: ThemeService) -> Router {
    build_app(AppState {
        config: Arc::new(test_config()),
        themes: Arc::new(service),
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// An image part for [`multipart_body`].
pub struct ImagePart<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

const BOUNDARY: &str = "escape-test-boundary";

/// Encode text fields and an optional `image` file as `multipart/form-data`.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<ImagePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(image) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                image.file_name, image.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(image.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn send_multipart(app: Router, method: Method, uri: &str, body: Vec<u8>) -> Response {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Form fields of the reference theme used across tests.
pub const LOCKDOWN: [(&str, &str); 5] = [
    ("title", "Lockdown"),
    ("location", "Seoul"),
    ("description", "Prison break"),
    ("difficulty", "4"),
    ("scariness", "2"),
];
