//! Response DTOs for API endpoints
//!
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use gallery_core::{EventFeedbackSummary, FeedbackType, FilterOperator, PhotoStats, PhotoType};
use serde::{Deserialize, Serialize};

// ============================================================================
// Guest Session
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestSessionResponse {
    pub guest_identifier: String,
    pub event_id: String,
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

// ============================================================================
// Photos
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoResponse {
    pub id: String,
    pub event_id: String,
    pub filename: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
    pub photo_type: PhotoType,
    pub comment_count: i32,
    pub like_count: i32,
    pub favorite_count: i32,
    pub average_rating: f64,
    pub feedback_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteredPhotosResponse {
    pub photo_ids: Vec<String>,
    pub liked: bool,
    pub favorited: bool,
    pub operator: FilterOperator,
}

// ============================================================================
// Feedback
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub id: String,
    pub event_id: String,
    pub photo_id: String,
    pub feedback_type: FeedbackType,
    pub rating: Option<i16>,
    pub comment_text: Option<String>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    /// Only present in admin views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_identifier: Option<String>,
    pub is_approved: bool,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionAction {
    Added,
    Updated,
    Removed,
}

/// Outcome of a feedback submission plus the photo's fresh counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSubmissionResponse {
    pub action: SubmissionAction,
    pub feedback_type: FeedbackType,
    /// Absent when a toggle removed the row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackResponse>,
    pub stats: PhotoStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSettingsResponse {
    pub event_id: String,
    pub feedback_enabled: bool,
    pub allow_likes: bool,
    pub allow_ratings: bool,
    pub allow_comments: bool,
    pub allow_favorites: bool,
    pub moderate_comments: bool,
    pub show_feedback_to_guests: bool,
    pub show_guest_names: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummaryResponse {
    pub event_id: String,
    #[serde(flatten)]
    pub summary: EventFeedbackSummary,
}

/// One exported feedback row, joined with its photo
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackExportRow {
    pub id: String,
    pub photo_id: String,
    pub photo_filename: Option<String>,
    pub feedback_type: FeedbackType,
    pub rating: Option<i16>,
    pub comment_text: Option<String>,
    pub guest_identifier: String,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub is_approved: bool,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Moderation
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationResponse {
    pub feedback_id: String,
    pub action: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditEntryResponse {
    pub id: String,
    pub event_id: String,
    pub actor_id: String,
    pub action: String,
    pub target_id: String,
    pub target_type: String,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
