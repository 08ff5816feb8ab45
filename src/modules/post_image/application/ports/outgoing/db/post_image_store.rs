use async_trait::async_trait;

use crate::post_image::application::domain::entities::PostImageRecord;

/// State of the `images` attribute a conditional update requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagesPrecondition {
    /// `images` has never been set on the record (or the record is missing).
    ImagesNotExist,
    /// `images` is present, possibly empty.
    ImagesExist,
}

/// How the update changes the `images` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagesMutation {
    /// Replace whatever is there with this list.
    Initialize(Vec<String>),
    /// Append to the end of the current list, keeping prior order.
    Append(Vec<String>),
}

/// One guarded partial update of a post's image fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostImageUpdate {
    pub table: String,
    pub post_id: String,
    pub precondition: ImagesPrecondition,
    pub images: ImagesMutation,
    /// Overwrites the display image when `Some`; leaves it untouched when `None`.
    pub display_image: Option<String>,
    pub updated_date_time: i64,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConditionalUpdateError {
    /// The precondition did not hold; nothing was written.
    #[error("Conditional check failed")]
    ConditionCheckFailed,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Port over the document store holding post image state.
#[async_trait]
pub trait PostImageStore: Send + Sync {
    /// Applies `update` only if its precondition holds, returning the record as written.
    async fn conditional_update(
        &self,
        update: PostImageUpdate,
    ) -> Result<PostImageRecord, ConditionalUpdateError>;
}
