use async_trait::async_trait;
use bytes::Bytes;

/// Errors that can occur when writing to blob storage.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum BlobStoreError {
    #[error("Access denied")]
    AccessDenied,

    #[error("Bucket not found")]
    BucketNotFound,

    #[error("Infrastructure error occurred: {0}")]
    Infrastructure(String),
}

/// Port for persisting binary assets by bucket + key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes `bytes` under `key`, replacing any existing object.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), BlobStoreError>;
}
