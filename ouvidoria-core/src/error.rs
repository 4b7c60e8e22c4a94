use thiserror::Error;

#[derive(Error, Debug)]
pub enum OuvidoriaError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Transcription error: {0}")]
    TranscriptionError(String),

    #[error("Transcription service not configured: {0}")]
    TranscriptionNotConfigured(String),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, OuvidoriaError>;
