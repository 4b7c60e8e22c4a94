//! Manifestation submission handler
//!
//! Handles POST /manifestations requests to register a citizen submission and
//! hand back its protocol code.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use ouvidoria_core::{Contact, NewManifestation, SubmissionContent};

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{validate_content_type, validate_file_size};

/// Response for a successfully registered manifestation
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManifestationResponse {
    /// Internal identifier for this manifestation
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Protocol code the citizen uses for tracking
    #[schema(example = "PDF20250101-123456")]
    pub protocol: String,
    /// Manifestation type: "text", "audio", or "media"
    #[serde(rename = "type")]
    #[schema(example = "text")]
    pub kind: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Initial status (always "recebida")
    #[schema(example = "recebida")]
    pub status: String,
}

/// Register a new manifestation
///
/// Accepts multipart/form-data with:
/// - **type** (required): "text", "audio", or "media"
/// - **content**: manifestation text (required for type=text)
/// - **media_description**: description of the attached media (required for type=media)
/// - **file**: audio recording or media file (required for type=audio/media, max 50MB)
/// - **is_anonymous**: "true" to submit anonymously (contact fields are then discarded)
/// - **email**, **name**: optional contact details for identified submissions
///
/// Binary payloads are used only for the response round trip; they are never
/// persisted with the record.
#[utoipa::path(
    post,
    path = "/manifestations",
    tag = "Manifestations",
    request_body(
        content_type = "multipart/form-data",
        description = "Manifestation fields and optional binary payload"
    ),
    responses(
        (status = 201, description = "Manifestation registered", body = ManifestationResponse),
        (status = 400, description = "Invalid request (missing or mismatched fields, unsupported format)"),
        (status = 413, description = "File too large (max 50MB)"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_manifestation_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ManifestationResponse>), ApiError> {
    let mut kind: Option<String> = None;
    let mut content: Option<String> = None;
    let mut media_description: Option<String> = None;
    let mut file_data: Option<Vec<u8>> = None;
    let mut is_anonymous = false;
    let mut email: Option<String> = None;
    let mut name: Option<String> = None;

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to parse multipart: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "type" => {
                kind = Some(field.text().await.unwrap_or_default().to_lowercase());
            }
            "content" => {
                content = Some(field.text().await.unwrap_or_default());
            }
            "media_description" => {
                media_description = Some(field.text().await.unwrap_or_default());
            }
            "is_anonymous" => {
                let value = field.text().await.unwrap_or_default();
                is_anonymous = value.to_lowercase() == "true";
            }
            "email" => {
                email = Some(field.text().await.unwrap_or_default()).filter(|v| !v.is_empty());
            }
            "name" => {
                name = Some(field.text().await.unwrap_or_default()).filter(|v| !v.is_empty());
            }
            "file" => {
                validate_content_type(field.content_type())?;

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?
                    .to_vec();

                validate_file_size(data.len(), state.max_upload_bytes)?;
                file_data = Some(data);
            }
            _ => {}
        }
    }

    let kind = kind.ok_or_else(|| {
        ApiError::bad_request("No manifestation type provided. Use the 'type' field.")
    })?;

    let submission_content = match kind.as_str() {
        "text" => {
            let content = content
                .filter(|c| !c.trim().is_empty())
                .ok_or_else(|| ApiError::bad_request("Text manifestations require 'content'."))?;
            SubmissionContent::Text { content }
        }
        "audio" => {
            let recording = file_data.ok_or_else(|| {
                ApiError::bad_request("Audio manifestations require a 'file' upload.")
            })?;
            SubmissionContent::Audio { recording }
        }
        "media" => {
            let file = file_data.ok_or_else(|| {
                ApiError::bad_request("Media manifestations require a 'file' upload.")
            })?;
            let description = media_description
                .filter(|d| !d.trim().is_empty())
                .ok_or_else(|| {
                    ApiError::bad_request("Media manifestations require 'media_description'.")
                })?;
            SubmissionContent::Media { description, file }
        }
        other => {
            return Err(ApiError::bad_request(format!(
                "Unknown manifestation type: '{}'. Expected text, audio, or media.",
                other
            )));
        }
    };

    // Anonymous submissions carry no contact details, whatever the form sent
    let contact = if is_anonymous {
        Contact::Anonymous
    } else {
        Contact::Identified { name, email }
    };

    let submission = state.store.create(NewManifestation {
        content: submission_content,
        contact,
    })?;
    let record = submission.record;

    tracing::info!(
        protocol = %record.protocol,
        kind = record.payload.type_name(),
        anonymous = record.is_anonymous,
        "Manifestation registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(ManifestationResponse {
            id: record.id,
            protocol: record.protocol,
            kind: record.payload.type_name().to_string(),
            created_at: record.created_at,
            status: record.status.as_str().to_string(),
        }),
    ))
}
