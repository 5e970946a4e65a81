//! Asset upload gateway.
//!
//! Stores uploaded theme images in object storage and hands back the public
//! URL under which each stored object can be retrieved. Stored assets are
//! immutable: there is no overwrite or delete.

use async_trait::async_trait;
use bytes::Bytes;

pub mod key;
pub mod s3;

pub use s3::{S3AssetStore, S3Config};

/// A fully buffered upload waiting to be written.
///
/// The store takes ownership, so the buffer is released as soon as the write
/// completes or fails.
#[derive(Debug, Clone)]
pub struct UploadedAsset {
    /// Filename supplied by the client, unsanitized.
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedAsset {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Location of a successfully written asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub key: String,
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AssetStoreError {
    /// The object store did not confirm the write.
    #[error("Asset upload failed for key {key}: {reason}")]
    Upload { key: String, reason: String },
}

/// Durable binary storage yielding public URLs.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Write `asset` under a freshly generated key.
    async fn store(&self, asset: UploadedAsset) -> Result<StoredAsset, AssetStoreError>;
}
