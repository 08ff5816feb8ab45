use crate::shared::api::ApiResponse;
use actix_web::{error::JsonPayloadError, http::StatusCode, web::JsonConfig};

/// JSON extractor config: body limit in bytes, extractor errors in the `ApiResponse` envelope.
pub fn custom_json_config(limit: usize) -> JsonConfig {
    JsonConfig::default().limit(limit).error_handler(|err, _req| {
        let message = err.to_string();
        let response = match err {
            JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                ApiResponse::error(StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", &message)
            }
            _ => ApiResponse::bad_request("VALIDATION_ERROR", &message),
        };
        actix_web::error::InternalError::from_response(err, response).into()
    })
}
