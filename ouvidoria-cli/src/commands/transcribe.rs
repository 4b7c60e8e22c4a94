//! Transcribe command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use ouvidoria_core::{ElevenLabsTranscriber, SpeechToText};

/// Guess the MIME type from the file extension. The provider uses it as a
/// decoding hint only.
fn guess_mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("flac") => "audio/flac",
        _ => "audio/webm",
    }
}

/// Execute the transcribe command.
pub async fn execute(audio: PathBuf) -> Result<()> {
    let bytes = std::fs::read(&audio)
        .with_context(|| format!("Failed to read audio file: {}", audio.display()))?;

    let file_name = audio
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("recording")
        .to_string();
    let mime_type = guess_mime_type(&audio);

    info!(path = %audio.display(), bytes = bytes.len(), mime_type, "Transcribing audio");

    let transcriber = ElevenLabsTranscriber::from_env()
        .context("Transcription requires ELEVENLABS_API_KEY to be set")?;
    let text = transcriber
        .transcribe(bytes, &file_name, mime_type)
        .await
        .context("Transcription failed")?;

    println!();
    println!("{}", "Transcription:".green().bold());
    println!();
    println!("{text}");

    Ok(())
}
