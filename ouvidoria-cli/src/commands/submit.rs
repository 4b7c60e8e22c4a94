//! Submit command implementation.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::info;

use ouvidoria_core::{Contact, NewManifestation, SubmissionContent};

/// Execute the submit command.
pub async fn execute(
    data_dir: PathBuf,
    text: Option<String>,
    audio: Option<PathBuf>,
    media: Option<PathBuf>,
    description: Option<String>,
    name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let content = match (text, audio, media) {
        (Some(content), None, None) => {
            if content.trim().is_empty() {
                bail!("Text content must not be empty");
            }
            SubmissionContent::Text { content }
        }
        (None, Some(path), None) => {
            let recording = std::fs::read(&path)
                .with_context(|| format!("Failed to read audio file: {}", path.display()))?;
            SubmissionContent::Audio { recording }
        }
        (None, None, Some(path)) => {
            let file = std::fs::read(&path)
                .with_context(|| format!("Failed to read media file: {}", path.display()))?;
            let description = match description {
                Some(d) if !d.trim().is_empty() => d,
                _ => bail!("A media submission requires a non-empty --description"),
            };
            SubmissionContent::Media { description, file }
        }
        _ => bail!("Provide exactly one of --text, --audio, or --media"),
    };

    let contact = match (name, email) {
        (None, None) => Contact::Anonymous,
        (name, email) => Contact::Identified { name, email },
    };

    let store = super::open_store(&data_dir)?;
    let submission = store
        .create(NewManifestation { content, contact })
        .context("Failed to register manifestation")?;

    let record = &submission.record;
    info!(protocol = %record.protocol, kind = record.payload.type_name(), "Manifestation registered");

    println!();
    println!("{}", "Manifestation registered!".green().bold());
    println!();
    println!("   {} {}", "Protocol:".dimmed(), record.protocol.bold());
    println!("   {} {}", "Type:".dimmed(), record.payload.type_name());
    println!("   {} {}", "Status:".dimmed(), record.status.label());
    println!(
        "   {} {}",
        "Created:".dimmed(),
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
    println!(
        "   {}",
        "Keep the protocol code to track this manifestation later.".dimmed()
    );

    Ok(())
}
