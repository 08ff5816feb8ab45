use crate::post_image::application::domain::entities::ThumbnailFormat;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AssetNameError {
    #[error("Field '{0}' cannot be empty")]
    EmptyField(&'static str),
}

/// Storage key plus the URL the asset is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetName {
    pub storage_key: String,
    pub public_path: String,
}

/// Key for an uploaded original: `<post_id>/<token>.<ext>`.
pub fn original_asset_name(
    base_url: &str,
    post_id: &str,
    token: &str,
    extension: &str,
) -> Result<AssetName, AssetNameError> {
    let (post_id, token) = require_key_parts(post_id, token)?;
    let extension = extension.trim();
    if extension.is_empty() {
        return Err(AssetNameError::EmptyField("extension"));
    }

    let storage_key = format!("{}/{}.{}", post_id, token, extension);
    Ok(AssetName {
        public_path: public_path(base_url, &storage_key),
        storage_key,
    })
}

/// Key for a thumbnail: `<post_id>/<token>-thumbnail.<format>`.
pub fn thumbnail_asset_name(
    base_url: &str,
    post_id: &str,
    token: &str,
    format: ThumbnailFormat,
) -> Result<AssetName, AssetNameError> {
    let (post_id, token) = require_key_parts(post_id, token)?;

    let storage_key = format!("{}/{}-thumbnail.{}", post_id, token, format.as_str());
    Ok(AssetName {
        public_path: public_path(base_url, &storage_key),
        storage_key,
    })
}

fn require_key_parts<'a>(
    post_id: &'a str,
    token: &'a str,
) -> Result<(&'a str, &'a str), AssetNameError> {
    let post_id = post_id.trim();
    if post_id.is_empty() {
        return Err(AssetNameError::EmptyField("post_id"));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AssetNameError::EmptyField("token"));
    }
    Ok((post_id, token))
}

/// Joins base URL and key with exactly one `/` between them.
fn public_path(base_url: &str, storage_key: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.is_empty() {
        return storage_key.to_string();
    }
    format!("{}/{}", base, storage_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://cdn.example.com/";

    #[test]
    fn test_original_asset_name_layout() {
        let name = original_asset_name(BASE, "post-1", "abc123", "jpg").unwrap();

        assert_eq!(name.storage_key, "post-1/abc123.jpg");
        assert_eq!(name.public_path, "https://cdn.example.com/post-1/abc123.jpg");
    }

    #[test]
    fn test_thumbnail_asset_name_uses_format_identifier() {
        let name = thumbnail_asset_name(BASE, "post-1", "abc123", ThumbnailFormat::Webp).unwrap();

        assert_eq!(name.storage_key, "post-1/abc123-thumbnail.webp");
        assert_eq!(
            name.public_path,
            "https://cdn.example.com/post-1/abc123-thumbnail.webp"
        );
    }

    #[test]
    fn test_public_path_adds_missing_separator() {
        let name = original_asset_name("https://cdn.example.com", "p", "t", "png").unwrap();
        assert_eq!(name.public_path, "https://cdn.example.com/p/t.png");
    }

    #[test]
    fn test_empty_post_id_is_rejected() {
        let err = original_asset_name(BASE, "  ", "abc", "png").unwrap_err();
        assert_eq!(err, AssetNameError::EmptyField("post_id"));

        let err = thumbnail_asset_name(BASE, "", "abc", ThumbnailFormat::Png).unwrap_err();
        assert_eq!(err, AssetNameError::EmptyField("post_id"));
    }

    #[test]
    fn test_empty_extension_is_rejected() {
        let err = original_asset_name(BASE, "post-1", "abc", "").unwrap_err();
        assert_eq!(err, AssetNameError::EmptyField("extension"));
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let err = original_asset_name(BASE, "post-1", "\t", "png").unwrap_err();
        assert_eq!(err, AssetNameError::EmptyField("token"));
    }
}
