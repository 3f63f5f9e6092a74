//! API error and response envelope types

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chart_engine::EngineError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Uniform response envelope for every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request produced a result
    pub success: bool,
    /// The result payload, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable error, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope around a payload
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed envelope with a message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Errors surfaced by the HTTP boundary
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request carried no file part
    #[error("No file uploaded")]
    MissingFile,

    /// Uploaded part is not an image
    #[error("File must be an image")]
    NotAnImage,

    /// Upload exceeds the size cap
    #[error("File size must be less than 10MB")]
    FileTooLarge,

    /// Multipart body could not be read
    #[error("Invalid multipart request: {0}")]
    BadRequest(String),

    /// The analysis itself failed (provider call)
    #[error(transparent)]
    Analysis(#[from] EngineError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile
            | ApiError::NotAnImage
            | ApiError::FileTooLarge
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("analysis request failed: {self}");
        }
        let body: ApiResponse<()> = ApiResponse::failure(self.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_400() {
        assert_eq!(ApiError::MissingFile.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotAnImage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::FileTooLarge.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_provider_failure_is_500() {
        let err = ApiError::Analysis(EngineError::ConfigError("x".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_envelope_shape() {
        let ok = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["data"], 1);
        assert!(ok.get("error").is_none());

        let fail = serde_json::to_value(ApiResponse::<()>::failure("nope")).unwrap();
        assert_eq!(fail["success"], false);
        assert_eq!(fail["error"], "nope");
        assert!(fail.get("data").is_none());
    }
}
