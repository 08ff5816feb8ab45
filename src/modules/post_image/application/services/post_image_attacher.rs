use chrono::Utc;
use tracing::{debug, info, warn};

use crate::post_image::application::{
    domain::entities::PostImageRecord,
    ports::outgoing::db::{
        ConditionalUpdateError, ImagesMutation, ImagesPrecondition, PostImageStore,
        PostImageUpdate,
    },
};

/// Input for attaching freshly uploaded assets to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachPostImage {
    pub post_id: String,
    pub original_path: String,
    pub thumbnail_path: Option<String>,
    pub is_display_image: bool,
}

/// Which conditional write ended up committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachPath {
    Created,
    Appended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedPostImage {
    pub path: AttachPath,
    pub record: PostImageRecord,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AttachImageError {
    /// Both preconditions failed in turn: `images` vanished between the two writes.
    #[error("Images of post {post_id} changed concurrently")]
    Conflict { post_id: String },

    #[error("Document store error: {0}")]
    Store(String),
}

/// Attaches asset paths to a post with an initialize-or-append pair of
/// conditional writes.
///
/// The create write only lands while `images` is absent and the append write
/// only while it is present, so exactly one of them can succeed at a time.
pub struct PostImageAttacher<S>
where
    S: PostImageStore,
{
    store: S,
    table_name: String,
}

impl<S> PostImageAttacher<S>
where
    S: PostImageStore,
{
    pub fn new(store: S, table_name: impl Into<String>) -> Self {
        Self {
            store,
            table_name: table_name.into(),
        }
    }

    pub async fn attach(
        &self,
        command: AttachPostImage,
    ) -> Result<AttachedPostImage, AttachImageError> {
        let display_image = if command.is_display_image {
            command.thumbnail_path.clone()
        } else {
            None
        };

        // 1) Initialize the list; only valid while `images` does not exist.
        let create = self.update(
            &command,
            ImagesPrecondition::ImagesNotExist,
            ImagesMutation::Initialize(vec![command.original_path.clone()]),
            display_image.clone(),
        );

        match self.store.conditional_update(create).await {
            Ok(record) => {
                info!(post_id = %command.post_id, "Initialized post images");
                return Ok(AttachedPostImage {
                    path: AttachPath::Created,
                    record,
                });
            }
            Err(ConditionalUpdateError::ConditionCheckFailed) => {
                debug!(
                    post_id = %command.post_id,
                    "Post images already initialized, appending instead"
                );
            }
            Err(ConditionalUpdateError::DatabaseError(e)) => {
                return Err(AttachImageError::Store(e));
            }
        }

        // 2) Append; only valid while `images` exists.
        let append = self.update(
            &command,
            ImagesPrecondition::ImagesExist,
            ImagesMutation::Append(vec![command.original_path.clone()]),
            display_image,
        );

        match self.store.conditional_update(append).await {
            Ok(record) => {
                info!(
                    post_id = %command.post_id,
                    images = record.images.len(),
                    "Appended image to post"
                );
                Ok(AttachedPostImage {
                    path: AttachPath::Appended,
                    record,
                })
            }
            Err(ConditionalUpdateError::ConditionCheckFailed) => {
                warn!(post_id = %command.post_id, "Append precondition failed");
                Err(AttachImageError::Conflict {
                    post_id: command.post_id,
                })
            }
            Err(ConditionalUpdateError::DatabaseError(e)) => Err(AttachImageError::Store(e)),
        }
    }

    fn update(
        &self,
        command: &AttachPostImage,
        precondition: ImagesPrecondition,
        images: ImagesMutation,
        display_image: Option<String>,
    ) -> PostImageUpdate {
        PostImageUpdate {
            table: self.table_name.clone(),
            post_id: command.post_id.clone(),
            precondition,
            images,
            display_image,
            updated_date_time: Utc::now().timestamp_millis(),
        }
    }
}
