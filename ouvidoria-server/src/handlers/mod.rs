//! HTTP request handlers
//!
//! This module contains all the request handlers for the API endpoints.

pub mod health;
pub mod manifestations;
pub mod tracking;
pub mod transcribe;

pub use crate::state::AppState;
pub use health::{health, ready, HealthResponse, ReadyResponse};
pub use manifestations::{create_manifestation_handler, ManifestationResponse};
pub use tracking::{track_handler, MilestoneView, TrackingResponse};
pub use transcribe::{transcribe_handler, TranscribeResponse};
