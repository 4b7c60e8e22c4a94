//! Record Store: creates and persists manifestation records.
//!
//! The whole collection lives under a single blob-store key as a JSON array,
//! in insertion order. Every create is a full read-modify-write of that key.
//! An unreadable or corrupt blob is treated as an empty collection so that
//! the create path never blocks on storage damage.

mod file;
mod memory;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{OuvidoriaError, Result};
use crate::manifestation::{Manifestation, NewManifestation, Status, Submission};
use crate::protocol::{generate_protocol, protocol_matches};

/// Blob-store key holding the serialized collection.
pub const MANIFESTATIONS_KEY: &str = "manifestations";

/// How many fresh protocols to try before accepting a possible collision.
const MAX_PROTOCOL_ATTEMPTS: u32 = 5;

/// Opaque persistent key-value substrate.
///
/// Values are opaque strings; the store layers JSON on top. Implementations
/// must treat `write` as atomic from the caller's perspective.
pub trait BlobStore: Send + Sync {
    /// Read the value under `key`, or `None` if the key was never written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Owns the manifestation collection. The only component that writes to the
/// blob store; the tracking resolver reads through [`Self::list_all`].
pub struct ManifestationStore {
    blobs: Arc<dyn BlobStore>,
}

impl ManifestationStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Create and persist a manifestation.
    ///
    /// Assigns a fresh id and protocol, stamps `created_at`, stores the
    /// record with `status = Recebida`, and returns the record together with
    /// any binary payload for the caller's immediate use. The persisted copy
    /// never contains binaries.
    pub fn create(&self, input: NewManifestation) -> Result<Submission> {
        let mut collection = self.load_collection();

        let created_at = Utc::now();
        let protocol = self.fresh_protocol(&collection, created_at.date_naive());
        let (payload, recording, media_file) = input.content.into_parts();
        let (is_anonymous, email, name) = input.contact.into_fields();

        let record = Manifestation {
            id: Uuid::new_v4(),
            protocol,
            payload,
            is_anonymous,
            email,
            name,
            created_at,
            status: Status::Recebida,
            status_updated_at: created_at,
        };

        collection.push(record.clone());
        self.persist(&collection)?;

        debug!(
            protocol = %record.protocol,
            kind = record.payload.type_name(),
            "Manifestation created"
        );

        Ok(Submission {
            record,
            recording,
            media_file,
        })
    }

    /// All persisted records, in insertion order. Fail-open: storage damage
    /// yields an empty collection.
    pub fn list_all(&self) -> Vec<Manifestation> {
        self.load_collection()
    }

    /// Generate a protocol that does not collide with an existing record,
    /// retrying a bounded number of times. The 6-digit space makes exhaustion
    /// astronomically unlikely; if it happens anyway, the last candidate is
    /// kept so that creation never fails on this path.
    fn fresh_protocol(&self, existing: &[Manifestation], date: chrono::NaiveDate) -> String {
        let mut rng = rand::thread_rng();
        let mut candidate = generate_protocol(date, &mut rng);

        for attempt in 1..MAX_PROTOCOL_ATTEMPTS {
            let collides = existing
                .iter()
                .any(|m| protocol_matches(&m.protocol, &candidate));
            if !collides {
                return candidate;
            }
            warn!(protocol = %candidate, attempt, "Protocol collision, regenerating");
            candidate = generate_protocol(date, &mut rng);
        }

        candidate
    }

    fn load_collection(&self) -> Vec<Manifestation> {
        let raw = match self.blobs.read(MANIFESTATIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Blob store unreadable, treating collection as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(collection) => collection,
            Err(e) => {
                warn!(error = %e, "Stored collection is corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, collection: &[Manifestation]) -> Result<()> {
        let raw = serde_json::to_string(collection)
            .map_err(|e| OuvidoriaError::SerializationError(e.to_string()))?;
        self.blobs.write(MANIFESTATIONS_KEY, &raw)
    }
}
