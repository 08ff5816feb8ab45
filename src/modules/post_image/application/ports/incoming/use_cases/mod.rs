mod upload_post_image;

pub use upload_post_image::{
    UploadPostImageCommand, UploadPostImageError, UploadPostImageUseCase, UploadedPostImage,
};
