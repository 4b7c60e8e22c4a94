//! Mock speech-to-text implementation for testing.

use async_trait::async_trait;

use super::SpeechToText;
use crate::error::Result;

/// Mock transcriber returning canned text.
/// Useful for tests and offline development; performs no network I/O.
pub struct MockTranscriber {
    text: String,
}

impl MockTranscriber {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new("Transcrição simulada para testes.")
    }
}

#[async_trait]
impl SpeechToText for MockTranscriber {
    async fn transcribe(
        &self,
        _audio: Vec<u8>,
        _file_name: &str,
        _mime_type: &str,
    ) -> Result<String> {
        Ok(self.text.clone())
    }
}
