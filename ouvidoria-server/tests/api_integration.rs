//! API integration tests for ouvidoria-server.
//!
//! These tests verify the HTTP API behavior with realistic multipart
//! requests, driving the full submit/track flow through the REST endpoints.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use ouvidoria_core::{ManifestationStore, MemoryBlobStore, MockTranscriber, SpeechToText};
use ouvidoria_server::{create_router, AppState};

const BOUNDARY: &str = "----TestBoundary7MA4YWxkTrZu0gW";

/// Multipart body builder for form fields and file uploads.
struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    fn new() -> Self {
        Self { body: Vec::new() }
    }

    fn text(mut self, name: &str, value: &str) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, file_name
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        (
            format!("multipart/form-data; boundary={}", BOUNDARY),
            self.body,
        )
    }
}

/// Build a test router over a fresh in-memory store.
fn create_test_app() -> Router {
    create_router(test_state())
}

fn test_state() -> AppState {
    let store = Arc::new(ManifestationStore::new(Arc::new(MemoryBlobStore::new())));
    AppState::new(store)
}

async fn post_multipart(app: Router, uri: &str, content_type: String, body: Vec<u8>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// ============================================================================
// Health & Readiness Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint_reports_degraded_without_transcriber() {
    let (status, json) = get_json(create_test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["transcription_available"], false);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_endpoint_healthy_with_transcriber() {
    let state = test_state()
        .with_transcriber(Arc::new(MockTranscriber::default()) as Arc<dyn SpeechToText>);
    let (status, json) = get_json(create_router(state), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["transcription_available"], true);
}

#[tokio::test]
async fn test_ready_endpoint_returns_ok() {
    let (status, json) = get_json(create_test_app(), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ready"], true);
}

// ============================================================================
// Submission Tests
// ============================================================================

#[tokio::test]
async fn test_create_text_manifestation() {
    let (content_type, body) = MultipartBody::new()
        .text("type", "text")
        .text("content", "Rua sem iluminação")
        .text("is_anonymous", "true")
        .finish();

    let (status, json) =
        post_multipart(create_test_app(), "/manifestations", content_type, body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["type"], "text");
    assert_eq!(json["status"], "recebida");

    let protocol = json["protocol"].as_str().unwrap();
    assert!(protocol.starts_with("PDF"));
    assert_eq!(protocol.len(), "PDF20250101-123456".len());
    assert_eq!(&protocol[11..12], "-");
    assert!(protocol[3..11].chars().all(|c| c.is_ascii_digit()));
    assert!(protocol[12..].chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_create_text_manifestation_requires_content() {
    let (content_type, body) = MultipartBody::new()
        .text("type", "text")
        .text("is_anonymous", "true")
        .finish();

    let (status, json) =
        post_multipart(create_test_app(), "/manifestations", content_type, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_create_audio_manifestation_with_file() {
    let (content_type, body) = MultipartBody::new()
        .text("type", "audio")
        .text("is_anonymous", "false")
        .text("name", "Maria")
        .text("email", "maria@example.com")
        .file("file", "gravacao.webm", "audio/webm", &[0xAB; 256])
        .finish();

    let (status, json) =
        post_multipart(create_test_app(), "/manifestations", content_type, body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["type"], "audio");
}

#[tokio::test]
async fn test_create_media_manifestation_requires_description() {
    let (content_type, body) = MultipartBody::new()
        .text("type", "media")
        .text("is_anonymous", "true")
        .file("file", "foto.jpg", "image/jpeg", &[0xFF, 0xD8, 0xFF])
        .finish();

    let (status, json) =
        post_multipart(create_test_app(), "/manifestations", content_type, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_create_rejects_unknown_type() {
    let (content_type, body) = MultipartBody::new()
        .text("type", "video")
        .text("is_anonymous", "true")
        .finish();

    let (status, _) =
        post_multipart(create_test_app(), "/manifestations", content_type, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_oversized_file_with_413() {
    let state = test_state().with_max_upload_size(16);

    let (content_type, body) = MultipartBody::new()
        .text("type", "media")
        .text("media_description", "foto grande")
        .text("is_anonymous", "true")
        .file("file", "foto.jpg", "image/jpeg", &[0xFF; 64])
        .finish();

    let (status, json) =
        post_multipart(create_router(state), "/manifestations", content_type, body).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["code"], "FILE_TOO_LARGE");
}

#[tokio::test]
async fn test_create_rejects_unsupported_file_type() {
    let (content_type, body) = MultipartBody::new()
        .text("type", "media")
        .text("media_description", "planilha")
        .text("is_anonymous", "true")
        .file("file", "dados.html", "text/html", b"<html></html>")
        .finish();

    let (status, _) =
        post_multipart(create_test_app(), "/manifestations", content_type, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Tracking Tests
// ============================================================================

#[tokio::test]
async fn test_track_round_trip_is_case_insensitive() {
    let store = Arc::new(ManifestationStore::new(Arc::new(MemoryBlobStore::new())));
    let state = AppState::new(store);

    let (content_type, body) = MultipartBody::new()
        .text("type", "text")
        .text("content", "Calçada interditada")
        .text("is_anonymous", "true")
        .finish();

    let (status, created) = post_multipart(
        create_router(state.clone()),
        "/manifestations",
        content_type,
        body,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let protocol = created["protocol"].as_str().unwrap().to_lowercase();
    let (status, json) = get_json(
        create_router(state),
        &format!("/manifestations/{protocol}"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "recebida");
    assert_eq!(json["content"], "Calçada interditada");
    assert_eq!(json["isAnonymous"], true);

    let timeline = json["timeline"].as_array().unwrap();
    assert_eq!(timeline.len(), 4);
    assert_eq!(timeline[0]["status"], "recebida");
    assert_eq!(timeline[0]["state"], "current");
    assert_eq!(timeline[3]["state"], "pending");
}

#[tokio::test]
async fn test_track_unknown_protocol_returns_not_found() {
    let (status, json) = get_json(create_test_app(), "/manifestations/NONEXISTENT-000000").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ============================================================================
// Transcription Tests
// ============================================================================

#[tokio::test]
async fn test_transcribe_without_provider_returns_service_unavailable() {
    let (content_type, body) = MultipartBody::new()
        .file("audio", "gravacao.webm", "audio/webm", &[0u8; 64])
        .finish();

    let (status, json) = post_multipart(create_test_app(), "/transcribe", content_type, body).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_transcribe_with_mock_provider() {
    let state = test_state().with_transcriber(
        Arc::new(MockTranscriber::new("Rua sem iluminação")) as Arc<dyn SpeechToText>,
    );

    let (content_type, body) = MultipartBody::new()
        .file("audio", "gravacao.webm", "audio/webm", &[0u8; 64])
        .finish();

    let (status, json) =
        post_multipart(create_router(state), "/transcribe", content_type, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["text"], "Rua sem iluminação");
}

#[tokio::test]
async fn test_transcribe_requires_audio_field() {
    let state = test_state()
        .with_transcriber(Arc::new(MockTranscriber::default()) as Arc<dyn SpeechToText>);

    let (content_type, body) = MultipartBody::new().text("other", "value").finish();
    let (status, _) = post_multipart(create_router(state), "/transcribe", content_type, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_transcribe_rejects_non_audio_upload() {
    let state = test_state()
        .with_transcriber(Arc::new(MockTranscriber::default()) as Arc<dyn SpeechToText>);

    let (content_type, body) = MultipartBody::new()
        .file("audio", "foto.png", "image/png", &[0x89, 0x50])
        .finish();
    let (status, _) = post_multipart(create_router(state), "/transcribe", content_type, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
