use crate::post_image::application::domain::entities::ThumbnailFormat;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Settings for the post image pipeline, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostImageConfig {
    pub max_thumbnail_resolution: u32,
    pub thumbnail_format: ThumbnailFormat,
    pub storage_base_url: String,
    pub bucket_name: String,
    pub table_name: String,
}

impl PostImageConfig {
    pub const DEFAULT_MAX_THUMBNAIL_RESOLUTION: u32 = 1024;
    pub const DEFAULT_TABLE_NAME: &'static str = "posts";

    /// Load from process env vars:
    /// `MAX_THUMBNAIL_RESOLUTION`, `THUMBNAIL_FORMAT`, `STORAGE_BASE_URL`,
    /// `BUCKET_NAME`, `TABLE_NAME`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same rules as `from_env`, reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let max_thumbnail_resolution = match read("MAX_THUMBNAIL_RESOLUTION") {
            None => Self::DEFAULT_MAX_THUMBNAIL_RESOLUTION,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(v) if v > 0 => v,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "MAX_THUMBNAIL_RESOLUTION",
                        value: raw,
                    })
                }
            },
        };

        let thumbnail_format = match read("THUMBNAIL_FORMAT") {
            None => ThumbnailFormat::default(),
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "THUMBNAIL_FORMAT",
                value: raw.clone(),
            })?,
        };

        let storage_base_url = read("STORAGE_BASE_URL")
            .map(|v| v.trim().to_string())
            .ok_or(ConfigError::Missing("STORAGE_BASE_URL"))?;

        let bucket_name = read("BUCKET_NAME")
            .map(|v| v.trim().to_string())
            .ok_or(ConfigError::Missing("BUCKET_NAME"))?;

        let table_name = read("TABLE_NAME")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| Self::DEFAULT_TABLE_NAME.to_string());
        if !is_sql_identifier(&table_name) {
            return Err(ConfigError::Invalid {
                name: "TABLE_NAME",
                value: table_name,
            });
        }

        Ok(Self {
            max_thumbnail_resolution,
            thumbnail_format,
            storage_base_url,
            bucket_name,
            table_name,
        })
    }

    /// Handy for unit tests or custom wiring (no env reads).
    pub fn new(storage_base_url: &str, bucket_name: &str) -> Self {
        Self {
            max_thumbnail_resolution: Self::DEFAULT_MAX_THUMBNAIL_RESOLUTION,
            thumbnail_format: ThumbnailFormat::default(),
            storage_base_url: storage_base_url.to_string(),
            bucket_name: bucket_name.to_string(),
            table_name: Self::DEFAULT_TABLE_NAME.to_string(),
        }
    }
}

/// Table names end up spliced into SQL, so only plain identifiers pass.
fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
