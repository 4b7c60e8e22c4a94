//! Protocol tracking handler
//!
//! Handles GET /manifestations/{protocol} requests, resolving a protocol code
//! to the record with its derived status and milestone timeline.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use ouvidoria_core::{timeline, Manifestation, Payload};

use crate::error::ApiError;
use crate::state::AppState;

/// One milestone of the tracking timeline
#[derive(Serialize, ToSchema)]
pub struct MilestoneView {
    /// Milestone status key
    #[schema(example = "em_analise")]
    pub status: String,
    /// Human-readable label (pt-BR)
    #[schema(example = "Em análise")]
    pub label: String,
    /// "completed", "current", or "pending"
    #[schema(example = "current")]
    pub state: String,
}

/// Tracking response: the record with its derived status plus the timeline
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub id: Uuid,
    #[schema(example = "PDF20250101-123456")]
    pub protocol: String,
    /// Manifestation type: "text", "audio", or "media"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_description: Option<String>,
    pub is_anonymous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Derived status key
    #[schema(example = "em_analise")]
    pub status: String,
    /// Human-readable status label (pt-BR)
    #[schema(example = "Em análise")]
    pub status_label: String,
    pub status_updated_at: DateTime<Utc>,
    /// The four fixed milestones annotated against the derived status
    pub timeline: Vec<MilestoneView>,
}

impl TrackingResponse {
    fn from_record(record: Manifestation) -> Self {
        let line = timeline(record.status)
            .into_iter()
            .map(|m| MilestoneView {
                status: m.status.as_str().to_string(),
                label: m.status.label().to_string(),
                state: m.state.as_str().to_string(),
            })
            .collect();

        let kind = record.payload.type_name().to_string();
        let (content, media_description) = match record.payload {
            Payload::Text { content } => (Some(content), None),
            Payload::Audio => (None, None),
            Payload::Media { media_description } => (None, Some(media_description)),
        };

        Self {
            id: record.id,
            protocol: record.protocol,
            kind,
            content,
            media_description,
            is_anonymous: record.is_anonymous,
            email: record.email,
            name: record.name,
            created_at: record.created_at,
            status: record.status.as_str().to_string(),
            status_label: record.status.label().to_string(),
            status_updated_at: record.status_updated_at,
            timeline: line,
        }
    }
}

/// Track a manifestation by protocol code
///
/// The lookup is case-insensitive. The returned status is derived from
/// elapsed time since creation; the stored record is never modified by this
/// read.
#[utoipa::path(
    get,
    path = "/manifestations/{protocol}",
    tag = "Tracking",
    params(
        ("protocol" = String, Path, description = "Protocol code, e.g. PDF20250101-123456")
    ),
    responses(
        (status = 200, description = "Manifestation found", body = TrackingResponse),
        (status = 404, description = "No manifestation with this protocol")
    )
)]
pub async fn track_handler(
    State(state): State<AppState>,
    Path(protocol): Path<String>,
) -> Result<Json<TrackingResponse>, ApiError> {
    let record = state.resolver.find_by_protocol(&protocol).ok_or_else(|| {
        ApiError::not_found(format!("No manifestation found for protocol '{protocol}'"))
    })?;

    tracing::debug!(
        protocol = %record.protocol,
        status = record.status.as_str(),
        "Protocol resolved"
    );

    Ok(Json(TrackingResponse::from_record(record)))
}
