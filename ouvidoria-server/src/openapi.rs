//! OpenAPI documentation configuration
//!
//! Generates OpenAPI 3.0 specification for the Voz Cidadã API.

use utoipa::OpenApi;

use crate::handlers::{
    HealthResponse, ManifestationResponse, MilestoneView, ReadyResponse, TrackingResponse,
    TranscribeResponse,
};

/// Voz Cidadã API - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Voz Cidadã - Ouvidoria API",
        version = "0.1.0",
        description = r#"
## Citizen-feedback intake API

Voz Cidadã lets a citizen submit a **manifestation** (complaint, suggestion,
praise, or report) to a public-sector ombudsman channel and track it later
by its protocol code.

### How It Works

1. **Submit** a manifestation via `POST /manifestations` (text, audio, or media)
2. The response carries a protocol code like `PDF20250101-123456`
3. **Track** progress later via `GET /manifestations/{protocol}`
4. Optionally **transcribe** an audio recording via `POST /transcribe` before submitting

Binary payloads (audio recording, media file) are never persisted; only the
record metadata survives submission.
"#,
        license(
            name = "MIT OR Apache-2.0",
            url = "https://github.com/voz-cidada/ouvidoria/blob/main/LICENSE"
        ),
        contact(
            name = "Voz Cidadã Team",
            url = "https://github.com/voz-cidada/ouvidoria"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    tags(
        (name = "Manifestations", description = "Register citizen submissions"),
        (name = "Tracking", description = "Resolve a protocol code to its status timeline"),
        (name = "Transcription", description = "Proxy audio recordings to the speech-to-text provider"),
        (name = "Health", description = "Service health and readiness endpoints")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::health::ready,
        crate::handlers::manifestations::create_manifestation_handler,
        crate::handlers::tracking::track_handler,
        crate::handlers::transcribe::transcribe_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ReadyResponse,
            ManifestationResponse,
            TrackingResponse,
            MilestoneView,
            TranscribeResponse,
        )
    )
)]
pub struct ApiDoc;
