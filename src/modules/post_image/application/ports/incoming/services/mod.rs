mod upload_post_image_service;

pub use upload_post_image_service::UploadPostImageService;
