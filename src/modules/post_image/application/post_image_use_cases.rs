use std::sync::Arc;

use crate::post_image::application::ports::incoming::use_cases::UploadPostImageUseCase;

#[derive(Clone)]
pub struct PostImageUseCases {
    pub upload: Arc<dyn UploadPostImageUseCase + Send + Sync>,
}
