//! Application state module
//!
//! Defines shared state accessible across all request handlers.

use std::sync::Arc;

use ouvidoria_core::{ManifestationStore, SpeechToText, TrackingResolver};

use crate::validation::DEFAULT_MAX_FILE_SIZE;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Record store owning the manifestation collection
    pub store: Arc<ManifestationStore>,
    /// Read-only tracking resolver over the same store
    pub resolver: TrackingResolver,
    /// Speech-to-text provider; absent when no API key is configured
    pub transcriber: Option<Arc<dyn SpeechToText>>,
    /// Per-file upload cap in bytes
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Build state around a record store, without transcription.
    pub fn new(store: Arc<ManifestationStore>) -> Self {
        let resolver = TrackingResolver::new(store.clone());
        Self {
            store,
            resolver,
            transcriber: None,
            max_upload_bytes: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Attach a speech-to-text provider.
    pub fn with_transcriber(mut self, transcriber: Arc<dyn SpeechToText>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    /// Override the per-file upload cap.
    pub fn with_max_upload_size(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }
}
