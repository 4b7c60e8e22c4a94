//! Ouvidoria Server - REST API for the Voz Cidadã citizen-feedback channel
//!
//! Exposes ouvidoria-core functionality via HTTP endpoints:
//! - POST /manifestations - Register a citizen submission
//! - GET /manifestations/{protocol} - Track a submission by protocol
//! - POST /transcribe - Proxy an audio recording to the speech-to-text provider

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use ouvidoria_core::{ElevenLabsTranscriber, FileBlobStore, ManifestationStore, SpeechToText};
use ouvidoria_server::{create_router_with_config, AppState, Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(data_dir = %config.data_dir.display(), "Starting ouvidoria-server");

    let blobs = FileBlobStore::new(&config.data_dir).expect("Failed to open data directory");
    let store = Arc::new(ManifestationStore::new(Arc::new(blobs)));
    let mut state = AppState::new(store).with_max_upload_size(config.max_file_size_bytes());

    match ElevenLabsTranscriber::from_env() {
        Ok(transcriber) => {
            tracing::info!("Transcription: ElevenLabs provider configured");
            state = state.with_transcriber(Arc::new(transcriber) as Arc<dyn SpeechToText>);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Transcription: DISABLED (/transcribe will return 503)");
        }
    }

    let app = create_router_with_config(&config, state);
    let addr = config.socket_addr();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Listening on http://{addr}");
    tracing::info!("API docs at http://{addr}/docs");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
