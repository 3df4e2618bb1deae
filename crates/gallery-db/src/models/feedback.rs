//! Feedback database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the photo_feedback table
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackModel {
    pub id: i64,
    pub event_id: i64,
    pub photo_id: i64,
    pub guest_identifier: String,
    pub feedback_type: String,
    pub rating: Option<i16>,
    pub comment_text: Option<String>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub is_approved: bool,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert result; `inserted` is false when an existing row was updated
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedFeedbackModel {
    #[sqlx(flatten)]
    pub feedback: FeedbackModel,
    pub inserted: bool,
}
