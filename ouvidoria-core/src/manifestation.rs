use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow stage of a manifestation.
///
/// The stored value is always `Recebida`; the displayed stage is derived at
/// read time from elapsed wall-clock time (see [`crate::tracking`]).
/// Variants are ordered, so later stages compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Recebida,
    EmAnalise,
    Encaminhada,
    Finalizada,
}

impl Status {
    /// The four fixed milestones, in workflow order.
    pub const ALL: [Status; 4] = [
        Status::Recebida,
        Status::EmAnalise,
        Status::Encaminhada,
        Status::Finalizada,
    ];

    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Recebida => "recebida",
            Status::EmAnalise => "em_analise",
            Status::Encaminhada => "encaminhada",
            Status::Finalizada => "finalizada",
        }
    }

    /// Human-readable label (pt-BR, as shown to citizens).
    pub fn label(&self) -> &'static str {
        match self {
            Status::Recebida => "Recebida",
            Status::EmAnalise => "Em análise",
            Status::Encaminhada => "Encaminhada",
            Status::Finalizada => "Finalizada",
        }
    }
}

/// Persisted payload metadata, tagged by manifestation type.
///
/// Exactly one variant applies per record. Binary payloads (audio recording,
/// media file) are never part of this enum: they are dropped at the storage
/// boundary and only exist in [`Submission`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Payload {
    Text {
        content: String,
    },
    Audio,
    Media {
        #[serde(rename = "mediaDescription")]
        media_description: String,
    },
}

impl Payload {
    /// Short type tag, matching the serialized `type` field.
    pub fn type_name(&self) -> &'static str {
        match self {
            Payload::Text { .. } => "text",
            Payload::Audio => "audio",
            Payload::Media { .. } => "media",
        }
    }
}

/// A single citizen submission to the ombudsman channel.
///
/// Created once by [`crate::store::ManifestationStore::create`] and never
/// updated or deleted afterwards. `protocol` is the human-facing lookup key;
/// `id` is the internal identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifestation {
    pub id: Uuid,
    pub protocol: String,
    #[serde(flatten)]
    pub payload: Payload,
    pub is_anonymous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: Status,
    pub status_updated_at: DateTime<Utc>,
}

/// Submission-time content, including the binary payloads that are handed to
/// the caller but never persisted.
#[derive(Debug, Clone)]
pub enum SubmissionContent {
    Text { content: String },
    Audio { recording: Vec<u8> },
    Media { description: String, file: Vec<u8> },
}

impl SubmissionContent {
    /// Split into the persistable metadata and the transient binary parts.
    pub(crate) fn into_parts(self) -> (Payload, Option<Vec<u8>>, Option<Vec<u8>>) {
        match self {
            SubmissionContent::Text { content } => (Payload::Text { content }, None, None),
            SubmissionContent::Audio { recording } => (Payload::Audio, Some(recording), None),
            SubmissionContent::Media { description, file } => (
                Payload::Media {
                    media_description: description,
                },
                None,
                Some(file),
            ),
        }
    }
}

/// Who is submitting. Anonymous submissions carry no contact fields at all,
/// which keeps the "anonymous implies no email/name" invariant structural.
#[derive(Debug, Clone)]
pub enum Contact {
    Anonymous,
    Identified {
        name: Option<String>,
        email: Option<String>,
    },
}

impl Contact {
    pub(crate) fn into_fields(self) -> (bool, Option<String>, Option<String>) {
        match self {
            Contact::Anonymous => (true, None, None),
            Contact::Identified { name, email } => (false, email, name),
        }
    }
}

/// Input to [`crate::store::ManifestationStore::create`].
#[derive(Debug, Clone)]
pub struct NewManifestation {
    pub content: SubmissionContent,
    pub contact: Contact,
}

/// Result of a create operation: the persisted record plus any binary payload
/// for the caller's immediate use (playback, preview). The persisted copy
/// never contains the binaries.
#[derive(Debug, Clone)]
pub struct Submission {
    pub record: Manifestation,
    pub recording: Option<Vec<u8>>,
    pub media_file: Option<Vec<u8>>,
}
