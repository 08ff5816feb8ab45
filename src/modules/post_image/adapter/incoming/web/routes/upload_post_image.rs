use actix_web::{http::StatusCode, post, web, HttpResponse, Responder};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::post_image::application::ports::incoming::use_cases::{
    UploadPostImageCommand, UploadPostImageError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Request DTO
// ──────────────────────────────────────────────────────────
//

/// Upload request. Fields are optional here so that missing values surface as
/// validation errors from the use case rather than as JSON parse errors.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadPostImageRequest {
    /// Post the image belongs to
    #[serde(default)]
    #[schema(example = "post-123")]
    pub post_id: Option<String>,

    /// Only the exact string "true" marks a display image
    #[serde(default)]
    #[schema(example = "true")]
    pub is_display_image: Option<String>,

    #[serde(default)]
    pub body: Option<UploadPostImageBody>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadPostImageBody {
    /// Base64 encoded image bytes (standard alphabet, padded)
    #[serde(default)]
    #[schema(example = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==")]
    pub base64_string: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Response DTO
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadPostImageResponse {
    /// Public path of the original image
    #[schema(example = "https://cdn.example.com/post-123/1f0c2e7a9b6d4c4e8f3a2b1c0d9e8f7a.png")]
    pub image: String,

    /// Public path of the thumbnail, null unless uploaded as display image
    #[schema(example = "https://cdn.example.com/post-123/1f0c2e7a9b6d4c4e8f3a2b1c0d9e8f7a-thumbnail.png")]
    pub thumbnail: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Handler
// ──────────────────────────────────────────────────────────
//

/// Upload post image
///
/// Stores the original image, and for display images a bounded thumbnail,
/// then records the paths on the post.
#[utoipa::path(
    post,
    path = "/api/post-images",
    tag = "post-images",
    request_body = UploadPostImageRequest,
    responses(
        (
            status = 201,
            description = "Image stored and attached to the post",
            body = inline(SuccessResponse<UploadPostImageResponse>),
            example = json!({
                "success": true,
                "data": {
                    "image": "https://cdn.example.com/post-123/1f0c2e7a.png",
                    "thumbnail": "https://cdn.example.com/post-123/1f0c2e7a-thumbnail.png"
                }
            })
        ),
        (
            status = 400,
            description = "Missing fields, bad base64, unsupported or undecodable image",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "UNSUPPORTED_MEDIA_TYPE",
                    "message": "Unsupported media type"
                }
            })
        ),
        (
            status = 409,
            description = "Post images changed concurrently",
            body = ErrorResponse
        ),
        (
            status = 502,
            description = "Blob storage or document store failure",
            body = ErrorResponse
        ),
        (
            status = 500,
            description = "Internal server error",
            body = ErrorResponse
        ),
    )
)]
#[post("/api/post-images")]
pub async fn upload_post_image_handler(
    req: web::Json<UploadPostImageRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    let is_display_image = req.is_display_image.as_deref() == Some("true");

    info!(post_id = ?req.post_id, is_display_image, "Post image upload requested");

    let payload = match req.body.and_then(|body| body.base64_string) {
        None => None,
        Some(encoded) => match STANDARD.decode(encoded.trim()) {
            Ok(bytes) => Some(Bytes::from(bytes)),
            Err(e) => {
                warn!(post_id = ?req.post_id, error = %e, "Rejected invalid base64 payload");
                return ApiResponse::bad_request(
                    "VALIDATION_ERROR",
                    &format!("Invalid base64 payload: {}", e),
                );
            }
        },
    };

    let command = UploadPostImageCommand::new(req.post_id, is_display_image, payload);

    match data.post_image.upload.execute(command).await {
        Ok(uploaded) => ApiResponse::created(UploadPostImageResponse {
            image: uploaded.original_path,
            thumbnail: uploaded.thumbnail_path,
        }),
        Err(e) => map_upload_error(e),
    }
}

fn map_upload_error(e: UploadPostImageError) -> HttpResponse {
    match e {
        UploadPostImageError::Validation(msg) => ApiResponse::bad_request("VALIDATION_ERROR", &msg),
        UploadPostImageError::UnsupportedMedia => {
            ApiResponse::bad_request("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type")
        }
        UploadPostImageError::Decode(msg) => ApiResponse::bad_request(
            "DECODE_ERROR",
            &format!("Failed to read image dimensions: {}", msg),
        ),
        UploadPostImageError::AttachConflict(post_id) => {
            warn!(post_id = %post_id, "Post image attach conflict");
            ApiResponse::conflict(
                "ATTACH_CONFLICT",
                &format!("Images of post {} changed concurrently", post_id),
            )
        }
        UploadPostImageError::BlobStore(msg) => {
            error!("Blob storage error uploading post image: {}", msg);
            ApiResponse::error(
                StatusCode::BAD_GATEWAY,
                "STORAGE_ERROR",
                "Failed to store image",
            )
        }
        UploadPostImageError::DocumentStore(msg) => {
            error!("Document store error attaching post image: {}", msg);
            ApiResponse::error(
                StatusCode::BAD_GATEWAY,
                "DOCUMENT_STORE_ERROR",
                "Failed to record image on post",
            )
        }
        UploadPostImageError::Codec(msg) => {
            error!("Codec error processing post image: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
