//! S3-backed [`AssetStore`].

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::key::{object_key, public_url};
use crate::{AssetStore, AssetStoreError, StoredAsset, UploadedAsset};

/// Name reported for credentials taken from configuration.
const CREDENTIALS_PROVIDER: &str = "escape-config";

/// Object storage settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Target bucket.
    pub bucket: String,
    /// Bucket region (default: `ap-northeast-2`).
    pub region: String,
    /// Custom endpoint for S3-compatible stores (MinIO, LocalStack).
    pub endpoint_url: Option<String>,
    /// Use path-style addressing, required by most S3-compatible stores.
    pub force_path_style: bool,
    /// Base URL prepended to object keys in returned URLs.
    pub public_base_url: Option<String>,
    /// Key prefix for uploaded theme images (default: `themes`).
    pub key_prefix: String,
    /// Static access key; the default AWS credential chain is used when unset.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl S3Config {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                   | Default          |
    /// |---------------------------|------------------|
    /// | `AWS_S3_BUCKET_NAME`      | required         |
    /// | `AWS_REGION`              | `ap-northeast-2` |
    /// | `AWS_ENDPOINT_URL`        | unset            |
    /// | `AWS_S3_FORCE_PATH_STYLE` | `false`          |
    /// | `ASSET_PUBLIC_BASE_URL`   | unset            |
    /// | `ASSET_KEY_PREFIX`        | `themes`         |
    /// | `AWS_ACCESS_KEY_ID`       | unset            |
    /// | `AWS_SECRET_ACCESS_KEY`   | unset            |
    pub fn from_env() -> Self {
        let bucket = std::env::var("AWS_S3_BUCKET_NAME").expect("AWS_S3_BUCKET_NAME must be set");

        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "ap-northeast-2".into());

        let force_path_style = std::env::var("AWS_S3_FORCE_PATH_STYLE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("AWS_S3_FORCE_PATH_STYLE must be true or false");

        let key_prefix = std::env::var("ASSET_KEY_PREFIX").unwrap_or_else(|_| "themes".into());

        Self {
            bucket,
            region,
            endpoint_url: non_empty_var("AWS_ENDPOINT_URL"),
            force_path_style,
            public_base_url: non_empty_var("ASSET_PUBLIC_BASE_URL"),
            key_prefix,
            access_key_id: non_empty_var("AWS_ACCESS_KEY_ID"),
            secret_access_key: non_empty_var("AWS_SECRET_ACCESS_KEY"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Writes assets to an S3 bucket with `PutObject`.
#[derive(Clone)]
pub struct S3AssetStore {
    client: aws_sdk_s3::Client,
    config: S3Config,
}

impl S3AssetStore {
    /// Build an S3 client from `config`.
    pub async fn connect(config: S3Config) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                CREDENTIALS_PROVIDER,
            ));
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = ?config.endpoint_url,
            "S3 asset store configured",
        );

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            config,
        }
    }
}

#[async_trait]
impl AssetStore for S3AssetStore {
    async fn store(&self, asset: UploadedAsset) -> Result<StoredAsset, AssetStoreError> {
        let key = object_key(&self.config.key_prefix, &asset.file_name);
        let size = asset.len();

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .content_type(asset.content_type)
            .body(ByteStream::from(asset.bytes))
            .send()
            .await
            .map_err(|e| AssetStoreError::Upload {
                key: key.clone(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        let url = public_url(
            self.config.public_base_url.as_deref(),
            &self.config.bucket,
            &self.config.region,
            &key,
        );
        tracing::debug!(%key, size, "Asset stored");

        Ok(StoredAsset { key, url })
    }
}
