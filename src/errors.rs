// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Request-path failures, split so the HTTP layer can map
/// client mistakes and upstream failures to different status codes
#[derive(Error, Debug)]
pub enum ImageServiceError {
    /// Size keyword outside the supported set (message lists the valid set)
    #[error("{0}")]
    InvalidFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Couldn't fetch images: {0}")]
    UpstreamError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ImageServiceError {
    fn code(&self) -> &'static str {
        match self {
            ImageServiceError::InvalidFormat(_) => "INVALID_FORMAT",
            ImageServiceError::InvalidInput(_) => "INVALID_INPUT",
            ImageServiceError::ValidationError(_) => "VALIDATION_ERROR",
            ImageServiceError::UpstreamError(_) => "UPSTREAM_ERROR",
            ImageServiceError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

/// Convert ImageServiceError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for ImageServiceError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ImageServiceError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            ImageServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ImageServiceError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ImageServiceError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            ImageServiceError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ImageServiceError::InvalidFormat("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ImageServiceError::ValidationError("count".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ImageServiceError::UpstreamError("timeout".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ImageServiceError::InternalError("oops".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let err = ImageServiceError::UpstreamError("OAuth error".into());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
        assert_eq!(body["error"]["message"], "Couldn't fetch images: OAuth error");
        assert!(body["error"]["timestamp"].is_string());
    }
}
