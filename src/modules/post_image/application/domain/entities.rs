use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Media type sniffed from the payload's leading bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedMediaType {
    pub extension: String,
    pub mime_type: String,
}

impl DetectedMediaType {
    pub fn new(extension: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ImageDimensionsError {
    #[error("Image dimensions must be positive (got {width}x{height})")]
    NonPositive { width: u32, height: u32 },
}

/// Pixel size of a decoded image. Both sides are always > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    width: u32,
    height: u32,
}

impl ImageDimensions {
    pub fn try_new(width: u32, height: u32) -> Result<Self, ImageDimensionsError> {
        if width == 0 || height == 0 {
            return Err(ImageDimensionsError::NonPositive { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Outcome of thumbnail planning.
///
/// When `should_resize` is false the target fields echo the original size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    pub should_resize: bool,
    pub target_width: u32,
    pub target_height: u32,
}

/// Everything the blob store needs to persist one asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDescriptor {
    pub storage_key: String,
    pub public_path: String,
    pub bytes: Bytes,
    pub bucket: String,
    pub content_type: String,
}

/// Image state of a post as held by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostImageRecord {
    pub post_id: String,
    pub images: Vec<String>,
    pub image: Option<String>,
    pub updated_date_time: i64,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Unsupported thumbnail format: {0}")]
pub struct UnknownThumbnailFormat(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThumbnailFormat {
    Jpeg,
    #[default]
    Png,
    Webp,
    Gif,
}

impl ThumbnailFormat {
    /// Identifier used as the thumbnail key's extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailFormat::Jpeg => "jpeg",
            ThumbnailFormat::Png => "png",
            ThumbnailFormat::Webp => "webp",
            ThumbnailFormat::Gif => "gif",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ThumbnailFormat::Jpeg => "image/jpeg",
            ThumbnailFormat::Png => "image/png",
            ThumbnailFormat::Webp => "image/webp",
            ThumbnailFormat::Gif => "image/gif",
        }
    }
}

impl fmt::Display for ThumbnailFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ThumbnailFormat {
    type Err = UnknownThumbnailFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(ThumbnailFormat::Jpeg),
            "png" => Ok(ThumbnailFormat::Png),
            "webp" => Ok(ThumbnailFormat::Webp),
            "gif" => Ok(ThumbnailFormat::Gif),
            other => Err(UnknownThumbnailFormat(other.to_string())),
        }
    }
}
