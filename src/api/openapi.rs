use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use crate::post_image::adapter::incoming::web::routes::{
    UploadPostImageBody, UploadPostImageRequest, UploadPostImageResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Post Image API",
        version = "1.0.0",
        description = "Stores post images and their thumbnails and records them on posts"
    ),
    paths(
        crate::post_image::adapter::incoming::web::routes::upload_post_image_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<UploadPostImageResponse>,
            ErrorResponse,
            ErrorDetail,

            // Post image DTOs
            UploadPostImageRequest,
            UploadPostImageBody,
            UploadPostImageResponse
        )
    ),
    tags(
        (name = "post-images", description = "Post image ingestion endpoints"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_upload_endpoint() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/post-images"));
        let components = doc.components.unwrap();
        assert!(components.schemas.contains_key("UploadPostImageRequest"));
        assert!(components.schemas.contains_key("ErrorResponse"));
    }
}
