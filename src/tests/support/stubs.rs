use async_trait::async_trait;

use crate::post_image::application::ports::incoming::use_cases::{
    UploadPostImageCommand, UploadPostImageError, UploadPostImageUseCase, UploadedPostImage,
};

/// Returns a fixed outcome for every upload.
#[derive(Clone)]
pub struct StubUploadPostImageUseCase {
    result: Result<UploadedPostImage, UploadPostImageError>,
}

impl StubUploadPostImageUseCase {
    pub fn success(original_path: &str, thumbnail_path: Option<&str>) -> Self {
        Self {
            result: Ok(UploadedPostImage {
                original_path: original_path.to_string(),
                thumbnail_path: thumbnail_path.map(str::to_string),
            }),
        }
    }

    pub fn failing(error: UploadPostImageError) -> Self {
        Self { result: Err(error) }
    }
}

impl Default for StubUploadPostImageUseCase {
    fn default() -> Self {
        Self::success("https://cdn.example.com/post-1/tok.png", None)
    }
}

#[async_trait]
impl UploadPostImageUseCase for StubUploadPostImageUseCase {
    async fn execute(
        &self,
        _command: UploadPostImageCommand,
    ) -> Result<UploadedPostImage, UploadPostImageError> {
        self.result.clone()
    }
}
