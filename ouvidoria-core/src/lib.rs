//! Ouvidoria Core - Citizen manifestation intake and tracking library
//!
//! This crate holds the domain logic of the Voz Cidadã ombudsman channel:
//! creating manifestation records, assigning protocol codes, and resolving a
//! protocol to its simulated status timeline.
//!
//! # Features
//!
//! - Append-only manifestation collection over a pluggable key-value blob store
//! - Human-facing protocol codes (`PDF{YYYYMMDD}-{6 digits}`) with bounded
//!   collision retry
//! - Time-derived status progression (no workflow backend exists; status is a
//!   pure function of elapsed time, isolated for later replacement)
//! - Speech-to-text client for audio manifestations (ElevenLabs)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ouvidoria_core::{
//!     Contact, ManifestationStore, MemoryBlobStore, NewManifestation, Status,
//!     SubmissionContent, TrackingResolver,
//! };
//!
//! # fn example() -> ouvidoria_core::Result<()> {
//! let store = Arc::new(ManifestationStore::new(Arc::new(MemoryBlobStore::new())));
//!
//! let submission = store.create(NewManifestation {
//!     content: SubmissionContent::Text {
//!         content: "Rua sem iluminação".to_string(),
//!     },
//!     contact: Contact::Anonymous,
//! })?;
//!
//! let resolver = TrackingResolver::new(store);
//! let tracked = resolver.find_by_protocol(&submission.record.protocol).unwrap();
//! assert_eq!(tracked.status, Status::Recebida);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod error;
pub mod manifestation;
pub mod protocol;
pub mod store;
pub mod tracking;
pub mod transcribe;

// Re-export main types for convenience
pub use error::{OuvidoriaError, Result};
pub use manifestation::{
    Contact, Manifestation, NewManifestation, Payload, Status, Submission, SubmissionContent,
};
pub use protocol::{generate_protocol, protocol_matches, PROTOCOL_PREFIX};
pub use store::{
    BlobStore, FileBlobStore, ManifestationStore, MemoryBlobStore, MANIFESTATIONS_KEY,
};
pub use tracking::{derive_status, timeline, Milestone, MilestoneState, TrackingResolver};
pub use transcribe::{ElevenLabsConfig, ElevenLabsTranscriber, MockTranscriber, SpeechToText};
