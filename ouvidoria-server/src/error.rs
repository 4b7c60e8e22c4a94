//! API error handling module
//!
//! Provides a unified error type for all API endpoints with structured error variants.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use ouvidoria_core::OuvidoriaError;

/// API error type with structured variants for different error categories
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request - client provided invalid input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Payload too large - an upload exceeds the configured size limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Not found - requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error - unexpected server-side failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Service unavailable - required service is not configured or available
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Core error - error from the ouvidoria domain library
    #[error("Core error: {0}")]
    Core(#[from] OuvidoriaError),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a payload too large error
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a service unavailable error
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Core(ref e) => match e {
                // Upstream transcription failures → 503
                OuvidoriaError::TranscriptionNotConfigured(_)
                | OuvidoriaError::TranscriptionError(_)
                | OuvidoriaError::HttpError(_) => StatusCode::SERVICE_UNAVAILABLE,

                // Internal processing failures → 500
                OuvidoriaError::StorageError(_) | OuvidoriaError::SerializationError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Get the error code for programmatic error handling
    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "INVALID_INPUT",
            Self::PayloadTooLarge(_) => "FILE_TOO_LARGE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Core(ref e) => match e {
                OuvidoriaError::TranscriptionNotConfigured(_) => "TRANSCRIPTION_UNCONFIGURED",
                OuvidoriaError::TranscriptionError(_) => "TRANSCRIPTION_FAILED",
                OuvidoriaError::HttpError(_) => "UPSTREAM_ERROR",
                OuvidoriaError::StorageError(_) => "STORAGE_ERROR",
                OuvidoriaError::SerializationError(_) => "SERIALIZATION_ERROR",
            },
        }
    }

    /// Get sanitized error message for client response
    fn client_message(&self) -> String {
        match self {
            // For core errors, sanitize internal details
            Self::Core(ref e) => match e {
                OuvidoriaError::TranscriptionNotConfigured(_) => {
                    "Transcription service not configured".to_string()
                }
                OuvidoriaError::TranscriptionError(_) => "Could not transcribe audio".to_string(),
                OuvidoriaError::HttpError(_) => "Upstream service error".to_string(),
                OuvidoriaError::StorageError(_) => "Storage operation failed".to_string(),
                OuvidoriaError::SerializationError(_) => "Record serialization error".to_string(),
            },
            // For other errors, use the Display message
            _ => self.to_string(),
        }
    }

    /// Get the error category for logging
    fn error_category(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Core(_) => "core",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let category = self.error_category();
        let code = self.error_code();
        let internal_message = self.to_string();
        let client_message = self.client_message();

        // Log based on severity, always including internal details
        match &self {
            Self::BadRequest(_) | Self::PayloadTooLarge(_) | Self::NotFound(_) => {
                tracing::warn!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Client error"
                );
            }
            Self::ServiceUnavailable(_) => {
                tracing::warn!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Service unavailable"
                );
            }
            Self::Internal(_) => {
                tracing::error!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Server error"
                );
            }
            Self::Core(_) => {
                tracing::error!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    client_message = %client_message,
                    "Core error (internal details logged)"
                );
            }
        }

        // All error responses include a `code` field for programmatic error handling
        let body = serde_json::json!({
            "error": client_message,
            "code": code,
        });

        (status, Json(body)).into_response()
    }
}
