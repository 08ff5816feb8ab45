mod upload_post_image;

pub use upload_post_image::{
    upload_post_image_handler, UploadPostImageBody, UploadPostImageRequest,
    UploadPostImageResponse,
};
// OpenAPI path metadata generated by `#[utoipa::path]`
pub use upload_post_image::__path_upload_post_image_handler;
