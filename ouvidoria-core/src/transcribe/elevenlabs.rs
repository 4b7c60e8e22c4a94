//! ElevenLabs Speech-to-Text client.
//!
//! One-shot multipart upload to the ElevenLabs API, tuned for Brazilian
//! Portuguese manifestations. Failures surface as errors; the caller decides
//! whether to let the citizen type the text instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::SpeechToText;
use crate::error::{OuvidoriaError, Result};

/// Default ElevenLabs speech-to-text endpoint.
const DEFAULT_API_URL: &str = "https://api.elevenlabs.io/v1/speech-to-text";

/// Default timeout for the upload + recognition round trip.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Recognition model used for manifestation audio.
const DEFAULT_MODEL_ID: &str = "scribe_v2";

/// ISO 639-2 language code for Brazilian Portuguese.
const DEFAULT_LANGUAGE_CODE: &str = "por";

/// Successful response body from the ElevenLabs API.
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Configuration for the ElevenLabs client.
#[derive(Clone)]
pub struct ElevenLabsConfig {
    /// API endpoint URL.
    pub api_url: String,
    /// API key sent in the `xi-api-key` header.
    pub api_key: String,
    /// Recognition model identifier.
    pub model_id: String,
    /// Language hint for recognition.
    pub language_code: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ElevenLabsConfig {
    /// Create configuration from environment variables.
    ///
    /// Required: `ELEVENLABS_API_KEY`
    /// Optional: `ELEVENLABS_API_URL`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ELEVENLABS_API_KEY").map_err(|_| {
            OuvidoriaError::TranscriptionNotConfigured(
                "ELEVENLABS_API_KEY environment variable not set".into(),
            )
        })?;

        let api_url =
            std::env::var("ELEVENLABS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_url,
            api_key,
            model_id: DEFAULT_MODEL_ID.to_string(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }
}

impl std::fmt::Debug for ElevenLabsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevenLabsConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("model_id", &self.model_id)
            .field("language_code", &self.language_code)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// ElevenLabs speech-to-text client.
///
/// ## Example
///
/// ```no_run
/// use ouvidoria_core::{ElevenLabsTranscriber, SpeechToText};
///
/// # async fn example() -> ouvidoria_core::Result<()> {
/// let transcriber = ElevenLabsTranscriber::from_env()?;
/// let text = transcriber
///     .transcribe(std::fs::read("gravacao.webm").unwrap(), "gravacao.webm", "audio/webm")
///     .await?;
/// println!("{text}");
/// # Ok(())
/// # }
/// ```
pub struct ElevenLabsTranscriber {
    client: Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsTranscriber {
    /// Create a client from environment configuration.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ElevenLabsConfig::from_env()?)
    }

    /// Create a client with explicit configuration.
    #[instrument(level = "debug", skip_all, fields(api_url = %config.api_url))]
    pub fn with_config(config: ElevenLabsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                warn!(error = %e, "Failed to create HTTP client");
                OuvidoriaError::TranscriptionError(format!("Failed to create HTTP client: {e}"))
            })?;

        debug!("ElevenLabs transcription client created");
        Ok(Self { client, config })
    }
}

#[async_trait]
impl SpeechToText for ElevenLabsTranscriber {
    #[instrument(level = "info", skip(self, audio), fields(bytes = audio.len(), mime_type))]
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        mime_type: &str,
    ) -> Result<String> {
        let part = Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;

        let form = Form::new()
            .part("file", part)
            .text("model_id", self.config.model_id.clone())
            .text("language_code", self.config.language_code.clone());

        let response = self
            .client
            .post(&self.config.api_url)
            .header("xi-api-key", &self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Transcription request rejected by provider");
            return Err(OuvidoriaError::TranscriptionError(format!(
                "Provider returned status {status}: {body}"
            )));
        }

        let transcription: TranscriptionResponse = response.json().await.map_err(|e| {
            OuvidoriaError::TranscriptionError(format!("Failed to parse provider response: {e}"))
        })?;

        info!(chars = transcription.text.len(), "Transcription succeeded");
        Ok(transcription.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_api_key() {
        // Guard against a leaking environment in CI
        if std::env::var("ELEVENLABS_API_KEY").is_ok() {
            return;
        }
        assert!(matches!(
            ElevenLabsConfig::from_env(),
            Err(OuvidoriaError::TranscriptionNotConfigured(_))
        ));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = ElevenLabsConfig {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: "secret-key".to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret-key"));
    }

    #[test]
    fn test_create_client() {
        let config = ElevenLabsConfig {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: "k".to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        };
        assert!(ElevenLabsTranscriber::with_config(config).is_ok());
    }
}
