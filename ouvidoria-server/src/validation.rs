//! Upload validation module
//!
//! Provides validation utilities for multipart file uploads. Format and size
//! checks live at this boundary; the core treats payload bytes as opaque.

use crate::error::ApiError;

/// Allowed MIME type categories for media uploads
const ALLOWED_MIME_PREFIXES: &[&str] = &["image/", "video/", "audio/", "application/octet-stream"];

/// Default max file size in bytes (50 MB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Validates the Content-Type of an uploaded file
///
/// Accepts:
/// - image/* (image/jpeg, image/png, image/webp, etc.)
/// - video/* (video/mp4, video/webm, etc.)
/// - audio/* (audio/webm, audio/ogg, audio/mpeg, etc.)
/// - application/octet-stream (binary data)
///
/// Returns an error if the Content-Type is not supported.
pub fn validate_content_type(content_type: Option<&str>) -> Result<(), ApiError> {
    match content_type {
        Some(ct) => {
            let ct_lower = ct.to_lowercase();
            if ALLOWED_MIME_PREFIXES
                .iter()
                .any(|prefix| ct_lower.starts_with(prefix))
            {
                Ok(())
            } else {
                Err(ApiError::bad_request(format!(
                    "Unsupported Content-Type: '{}'. Allowed types: image/*, video/*, audio/*, application/octet-stream",
                    ct
                )))
            }
        }
        // Allow missing Content-Type (treat as binary)
        None => Ok(()),
    }
}

/// Validates the Content-Type of a recording sent for transcription.
/// Only audio uploads make sense here.
pub fn validate_audio_content_type(content_type: Option<&str>) -> Result<(), ApiError> {
    match content_type {
        Some(ct) if ct.to_lowercase().starts_with("audio/") => Ok(()),
        Some(ct) => Err(ApiError::bad_request(format!(
            "Unsupported Content-Type for transcription: '{}'. Expected audio/*",
            ct
        ))),
        None => Ok(()),
    }
}

/// Validates the size of an uploaded file
///
/// Returns a 413 error if the file exceeds the maximum size.
pub fn validate_file_size(size: usize, max_size: usize) -> Result<(), ApiError> {
    if size > max_size {
        let max_mb = max_size / (1024 * 1024);
        let actual_mb = size / (1024 * 1024);
        Err(ApiError::payload_too_large(format!(
            "File too large: {} MB exceeds maximum of {} MB",
            actual_mb, max_mb
        )))
    } else {
        Ok(())
    }
}
