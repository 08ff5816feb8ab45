use bytes::Bytes;

use crate::post_image::application::domain::entities::{
    DetectedMediaType, ImageDimensions, ThumbnailFormat,
};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Invalid resize target {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },

    #[error("Resize failed: {0}")]
    Resize(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

/// Port over the image codec.
///
/// All methods are CPU bound; async callers should run them on a blocking thread.
pub trait ImageCodec: Send + Sync {
    /// Sniffs the payload's media type from its content. `None` when unknown.
    fn detect_type(&self, bytes: &[u8]) -> Option<DetectedMediaType>;

    /// Reads the pixel size without necessarily decoding the whole image.
    fn decode_dimensions(&self, bytes: &[u8]) -> Result<ImageDimensions, CodecError>;

    /// Scales to exactly `width` x `height` and re-encodes as `format`.
    fn resize(
        &self,
        bytes: &[u8],
        width: u32,
        height: u32,
        format: ThumbnailFormat,
    ) -> Result<Bytes, CodecError>;
}
