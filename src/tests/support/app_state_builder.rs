use actix_web::web;
use std::sync::Arc;

use crate::post_image::application::ports::incoming::use_cases::UploadPostImageUseCase;
use crate::post_image::application::post_image_use_cases::PostImageUseCases;
use crate::tests::support::stubs::StubUploadPostImageUseCase;
use crate::AppState;

pub struct TestAppStateBuilder {
    upload_post_image: Arc<dyn UploadPostImageUseCase + Send + Sync>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            upload_post_image: Arc::new(StubUploadPostImageUseCase::default()),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_upload_post_image<U>(mut self, uc: U) -> Self
    where
        U: UploadPostImageUseCase + Send + Sync + 'static,
    {
        self.upload_post_image = Arc::new(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            post_image: PostImageUseCases {
                upload: self.upload_post_image,
            },
        })
    }
}
