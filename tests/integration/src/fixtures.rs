//! Test fixtures and response shapes
//!
//! Request and response DTOs come from gallery-service where they derive
//! `Deserialize`; the rest are mirrored here.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

pub use gallery_service::dto::{
    EventSummaryResponse, FeedbackResponse, FeedbackSettingsResponse,
    FeedbackSubmissionResponse, FilteredPhotosResponse, GuestSessionResponse, ModerationResponse,
    PhotoResponse, SubmissionAction, SubmitFeedbackRequest,
};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Moderation request body
#[derive(Debug, Serialize)]
pub struct ModerateRequest {
    pub action: String,
}

impl ModerateRequest {
    pub fn new(action: &str) -> Self {
        Self {
            action: action.to_string(),
        }
    }
}

/// Audit log entry as returned by the API
#[derive(Debug, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub event_id: String,
    pub actor_id: String,
    pub action: String,
    pub target_id: String,
    pub target_type: String,
    pub details: serde_json::Value,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
