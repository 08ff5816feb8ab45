use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;

use crate::post_image::application::{
    domain::asset_namer::AssetNameError,
    ports::outgoing::{cloud_storage::BlobStoreError, codec::CodecError},
    services::post_image_attacher::AttachImageError,
};

/// Raw upload as received from the transport.
///
/// Fields stay optional here; the use case validates them before any I/O.
#[derive(Debug, Clone, Default)]
pub struct UploadPostImageCommand {
    post_id: Option<String>,
    is_display_image: bool,
    payload: Option<Bytes>,
}

impl UploadPostImageCommand {
    pub fn new(post_id: Option<String>, is_display_image: bool, payload: Option<Bytes>) -> Self {
        Self {
            post_id,
            is_display_image,
            payload,
        }
    }

    pub fn post_id(&self) -> Option<&str> {
        self.post_id.as_deref()
    }

    pub fn is_display_image(&self) -> bool {
        self.is_display_image
    }

    pub fn payload(&self) -> Option<&Bytes> {
        self.payload.as_ref()
    }
}

/// Public paths of the stored assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedPostImage {
    pub original_path: String,
    pub thumbnail_path: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UploadPostImageError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unsupported media type")]
    UnsupportedMedia,

    #[error("Failed to read image dimensions: {0}")]
    Decode(String),

    #[error("Image processing error: {0}")]
    Codec(String),

    #[error("Blob storage error: {0}")]
    BlobStore(String),

    #[error("Document store error: {0}")]
    DocumentStore(String),

    #[error("Images of post {0} changed concurrently")]
    AttachConflict(String),
}

impl From<AssetNameError> for UploadPostImageError {
    fn from(error: AssetNameError) -> Self {
        UploadPostImageError::Validation(error.to_string())
    }
}

impl From<BlobStoreError> for UploadPostImageError {
    fn from(error: BlobStoreError) -> Self {
        UploadPostImageError::BlobStore(error.to_string())
    }
}

impl From<CodecError> for UploadPostImageError {
    fn from(error: CodecError) -> Self {
        UploadPostImageError::Codec(error.to_string())
    }
}

impl From<AttachImageError> for UploadPostImageError {
    fn from(error: AttachImageError) -> Self {
        match error {
            AttachImageError::Conflict { post_id } => UploadPostImageError::AttachConflict(post_id),
            AttachImageError::Store(e) => UploadPostImageError::DocumentStore(e),
        }
    }
}

#[async_trait]
pub trait UploadPostImageUseCase: Send + Sync {
    async fn execute(
        &self,
        command: UploadPostImageCommand,
    ) -> Result<UploadedPostImage, UploadPostImageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_errors_map_to_use_case_errors() {
        assert_eq!(
            UploadPostImageError::from(AttachImageError::Conflict {
                post_id: "p1".to_string()
            }),
            UploadPostImageError::AttachConflict("p1".to_string())
        );
        assert_eq!(
            UploadPostImageError::from(AttachImageError::Store("down".to_string())),
            UploadPostImageError::DocumentStore("down".to_string())
        );
    }

    #[test]
    fn test_asset_name_error_is_validation() {
        let err = UploadPostImageError::from(AssetNameError::EmptyField("extension"));
        assert!(matches!(err, UploadPostImageError::Validation(msg) if msg.contains("extension")));
    }
}
