use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::normalizer::MalformedResponse;
use crate::llm_client::GatewayError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Model provider error: {0}")]
    Provider(#[from] GatewayError),

    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponse),
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        // Body-limit rejections surface as multipart stream errors.
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::Input(format!("Malformed multipart upload: {}", e.body_text()))
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::Input(msg) => ("INPUT_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => ("PAYLOAD_TOO_LARGE", msg.clone()),
            AppError::Provider(e) => {
                tracing::error!("Provider error: {e}");
                (
                    "PROVIDER_ERROR",
                    "The model provider request failed".to_string(),
                )
            }
            AppError::MalformedResponse(e) => {
                tracing::error!("{e}; raw output: {}", e.raw);
                (
                    "MALFORMED_RESPONSE",
                    "The model returned output that is not valid résumé JSON".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_is_bad_request() {
        let err = AppError::Input("Empty pdf_bytes provided".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_payload_too_large_keeps_its_status() {
        let err = AppError::PayloadTooLarge("length limit exceeded".to_string());
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_provider_error_is_server_error() {
        let err = AppError::from(GatewayError::Api {
            status: 503,
            message: "overloaded".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
