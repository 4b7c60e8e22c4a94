//! Audio transcription proxy handler
//!
//! Handles POST /transcribe requests: one-shot proxy of a recording to the
//! configured speech-to-text provider. No retry, no streaming.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use ouvidoria_core::SpeechToText;

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{validate_audio_content_type, validate_file_size};

/// Response for a successful transcription
#[derive(Serialize, ToSchema)]
pub struct TranscribeResponse {
    /// Recognized text
    #[schema(example = "Rua sem iluminação há duas semanas.")]
    pub text: String,
}

/// Transcribe an audio recording
///
/// Accepts multipart/form-data with:
/// - **audio** (required): the recording to transcribe (audio/*, max 50MB)
///
/// Returns 503 when no speech-to-text provider is configured or the provider
/// call fails; the client should fall back to manual text entry.
#[utoipa::path(
    post,
    path = "/transcribe",
    tag = "Transcription",
    request_body(
        content_type = "multipart/form-data",
        description = "Audio recording to transcribe"
    ),
    responses(
        (status = 200, description = "Transcription succeeded", body = TranscribeResponse),
        (status = 400, description = "Invalid request (missing or non-audio upload)"),
        (status = 413, description = "Recording exceeds the size limit"),
        (status = 503, description = "Transcription service unavailable or not configured")
    )
)]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let mut audio_data: Option<Vec<u8>> = None;
    let mut file_name = "recording".to_string();
    let mut mime_type = "audio/webm".to_string();

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "audio" {
            validate_audio_content_type(field.content_type())?;

            if let Some(ct) = field.content_type() {
                mime_type = ct.to_string();
            }
            if let Some(fname) = field.file_name() {
                file_name = fname.to_string();
            }

            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read audio: {}", e)))?
                .to_vec();

            validate_file_size(data.len(), state.max_upload_bytes)?;
            audio_data = Some(data);
        }
    }

    let audio = audio_data.ok_or_else(|| {
        ApiError::bad_request("No audio file provided. Use 'audio' field in multipart form.")
    })?;

    let transcriber = state.transcriber.as_ref().ok_or_else(|| {
        ApiError::service_unavailable("Transcription service not configured")
    })?;

    tracing::info!(bytes = audio.len(), mime_type = %mime_type, "Proxying audio for transcription");

    let text = transcriber
        .transcribe(audio, &file_name, &mime_type)
        .await?;

    Ok(Json(TranscribeResponse { text }))
}
