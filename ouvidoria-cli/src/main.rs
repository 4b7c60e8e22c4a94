//! Ouvidoria CLI - Voz Cidadã citizen-feedback tool.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ouvidoria")]
#[command(author, version, about = "Citizen-feedback intake and tracking", long_about = None)]
struct Cli {
    /// Directory where manifestation records are stored
    #[arg(long, global = true, default_value = ".ouvidoria", value_name = "DIR")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new manifestation and receive its protocol code
    Submit {
        /// Text content of the manifestation
        #[arg(long, conflicts_with_all = ["audio", "media"])]
        text: Option<String>,

        /// Path to an audio recording (the recording itself is not stored)
        #[arg(long, value_name = "FILE", conflicts_with = "media")]
        audio: Option<PathBuf>,

        /// Path to a media file (the file itself is not stored)
        #[arg(long, value_name = "FILE", requires = "description")]
        media: Option<PathBuf>,

        /// Description accompanying a media file
        #[arg(long, value_name = "TEXT")]
        description: Option<String>,

        /// Name of the citizen (omit for an anonymous submission)
        #[arg(long, requires = "email")]
        name: Option<String>,

        /// Contact email of the citizen
        #[arg(long, requires = "name")]
        email: Option<String>,
    },

    /// Track a manifestation by its protocol code
    Track {
        /// Protocol code (e.g. PDF20250101-123456, case-insensitive)
        #[arg(value_name = "PROTOCOL")]
        protocol: String,
    },

    /// List all stored manifestations
    List {
        /// Emit the records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Transcribe an audio file via the speech-to-text provider
    Transcribe {
        /// Path to the audio file
        #[arg(value_name = "FILE")]
        audio: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr and stay silent unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit {
            text,
            audio,
            media,
            description,
            name,
            email,
        } => {
            commands::submit::execute(cli.data_dir, text, audio, media, description, name, email)
                .await
        }
        Commands::Track { protocol } => commands::track::execute(cli.data_dir, protocol).await,
        Commands::List { json } => commands::list::execute(cli.data_dir, json).await,
        Commands::Transcribe { audio } => commands::transcribe::execute(audio).await,
    }
}
