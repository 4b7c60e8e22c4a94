//! Speech-to-text integration.
//!
//! Audio manifestations may be transcribed through an external provider so
//! the citizen can review the text before submitting. The call is a single
//! request/response: no retry, no streaming, and the core never inspects the
//! audio encoding.

mod elevenlabs;
mod mock;

pub use elevenlabs::{ElevenLabsConfig, ElevenLabsTranscriber};
pub use mock::MockTranscriber;

use async_trait::async_trait;

use crate::error::Result;

/// A provider that turns raw audio bytes into recognized text.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe one recording. `file_name` and `mime_type` are forwarded
    /// verbatim to the provider; the audio itself is opaque to the core.
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str, mime_type: &str)
        -> Result<String>;
}
