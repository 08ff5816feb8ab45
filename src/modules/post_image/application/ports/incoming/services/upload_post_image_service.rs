use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{error, info};

use crate::post_image::application::{
    domain::{
        asset_namer::{original_asset_name, thumbnail_asset_name},
        entities::{AssetDescriptor, DetectedMediaType},
        policies::post_image_config::PostImageConfig,
        thumbnail_planner::plan_resize,
    },
    ports::{
        incoming::use_cases::{
            UploadPostImageCommand, UploadPostImageError, UploadPostImageUseCase,
            UploadedPostImage,
        },
        outgoing::{
            cloud_storage::BlobStore, codec::ImageCodec, db::PostImageStore,
            token::TokenGenerator,
        },
    },
    services::post_image_attacher::{AttachPostImage, PostImageAttacher},
};

pub struct UploadPostImageService<B, S, C, T>
where
    B: BlobStore,
    S: PostImageStore,
    C: ImageCodec,
    T: TokenGenerator,
{
    blob_store: B,
    attacher: PostImageAttacher<S>,
    codec: Arc<C>,
    token_generator: T,
    config: PostImageConfig,
}

impl<B, S, C, T> UploadPostImageService<B, S, C, T>
where
    B: BlobStore,
    S: PostImageStore,
    C: ImageCodec + 'static,
    T: TokenGenerator,
{
    pub fn new(
        blob_store: B,
        post_image_store: S,
        codec: C,
        token_generator: T,
        config: PostImageConfig,
    ) -> Self {
        Self {
            blob_store,
            attacher: PostImageAttacher::new(post_image_store, config.table_name.clone()),
            codec: Arc::new(codec),
            token_generator,
            config,
        }
    }

    async fn upload(&self, asset: &AssetDescriptor) -> Result<(), UploadPostImageError> {
        info!(
            bucket = %asset.bucket,
            storage_key = %asset.storage_key,
            bytes = asset.bytes.len(),
            "Uploading asset"
        );

        self.blob_store
            .put(
                &asset.bucket,
                &asset.storage_key,
                asset.bytes.clone(),
                &asset.content_type,
            )
            .await
            .map_err(|e| {
                error!(storage_key = %asset.storage_key, error = %e, "Asset upload failed");
                UploadPostImageError::from(e)
            })
    }

    /// Builds the thumbnail asset: resized when over bound, otherwise the
    /// original bytes under the thumbnail key.
    async fn prepare_thumbnail(
        &self,
        post_id: &str,
        token: &str,
        payload: &Bytes,
        media_type: &DetectedMediaType,
    ) -> Result<AssetDescriptor, UploadPostImageError> {
        let format = self.config.thumbnail_format;
        let name = thumbnail_asset_name(&self.config.storage_base_url, post_id, token, format)?;

        // Decode is CPU-bound; keep it off the async workers.
        let codec = Arc::clone(&self.codec);
        let bytes = payload.clone();
        let dimensions = tokio::task::spawn_blocking(move || codec.decode_dimensions(&bytes))
            .await
            .map_err(|e| UploadPostImageError::Codec(format!("Decode task failed: {}", e)))?
            .map_err(|e| UploadPostImageError::Decode(e.to_string()))?;

        let plan = plan_resize(dimensions, self.config.max_thumbnail_resolution);
        info!(
            post_id,
            width = dimensions.width(),
            height = dimensions.height(),
            should_resize = plan.should_resize,
            target_width = plan.target_width,
            target_height = plan.target_height,
            "Planned thumbnail"
        );

        let (bytes, content_type) = if plan.should_resize {
            let codec = Arc::clone(&self.codec);
            let bytes = payload.clone();
            let resized = tokio::task::spawn_blocking(move || {
                codec.resize(&bytes, plan.target_width, plan.target_height, format)
            })
            .await
            .map_err(|e| UploadPostImageError::Codec(format!("Resize task failed: {}", e)))??;

            (resized, format.mime_type().to_string())
        } else {
            (payload.clone(), media_type.mime_type.clone())
        };

        Ok(AssetDescriptor {
            storage_key: name.storage_key,
            public_path: name.public_path,
            bytes,
            bucket: self.config.bucket_name.clone(),
            content_type,
        })
    }
}

fn validate(command: &UploadPostImageCommand) -> Result<(String, Bytes), UploadPostImageError> {
    let post_id = command
        .post_id()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| UploadPostImageError::Validation("post_id not specified".to_string()))?;

    let payload = command
        .payload()
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| UploadPostImageError::Validation("payload not specified".to_string()))?;

    Ok((post_id.to_string(), payload.clone()))
}

#[async_trait]
impl<B, S, C, T> UploadPostImageUseCase for UploadPostImageService<B, S, C, T>
where
    B: BlobStore,
    S: PostImageStore,
    C: ImageCodec + 'static,
    T: TokenGenerator,
{
    async fn execute(
        &self,
        command: UploadPostImageCommand,
    ) -> Result<UploadedPostImage, UploadPostImageError> {
        // 1) Reject incomplete input before touching any store.
        let (post_id, payload) = validate(&command)?;
        let is_display_image = command.is_display_image();

        // 2) Classify by content, not by any client-supplied name.
        let media_type = self
            .codec
            .detect_type(&payload)
            .ok_or(UploadPostImageError::UnsupportedMedia)?;

        // 3) Original asset
        let token = self.token_generator.generate();
        let name = original_asset_name(
            &self.config.storage_base_url,
            &post_id,
            &token,
            &media_type.extension,
        )?;
        let original = AssetDescriptor {
            storage_key: name.storage_key,
            public_path: name.public_path,
            bytes: payload.clone(),
            bucket: self.config.bucket_name.clone(),
            content_type: media_type.mime_type.clone(),
        };
        info!(
            post_id = %post_id,
            mime_type = %media_type.mime_type,
            path = %original.public_path,
            "Preparing original file"
        );
        self.upload(&original).await?;

        // 4) Thumbnail, only for display images
        let thumbnail_path = if is_display_image {
            let thumbnail = self
                .prepare_thumbnail(&post_id, &token, &payload, &media_type)
                .await?;
            self.upload(&thumbnail).await?;
            Some(thumbnail.public_path)
        } else {
            None
        };

        // 5) Record paths on the post, only after every upload is acknowledged.
        let attached = self
            .attacher
            .attach(AttachPostImage {
                post_id: post_id.clone(),
                original_path: original.public_path.clone(),
                thumbnail_path: thumbnail_path.clone(),
                is_display_image,
            })
            .await
            .map_err(|e| {
                error!(post_id = %post_id, error = %e, "Attaching image to post failed");
                UploadPostImageError::from(e)
            })?;
        info!(
            post_id = %post_id,
            path = ?attached.path,
            images = attached.record.images.len(),
            "Image attached to post"
        );

        Ok(UploadedPostImage {
            original_path: original.public_path,
            thumbnail_path,
        })
    }
}
