//! Feedback settings database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the feedback_settings table
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackSettingsModel {
    pub event_id: i64,
    pub feedback_enabled: bool,
    pub allow_likes: bool,
    pub allow_ratings: bool,
    pub allow_comments: bool,
    pub allow_favorites: bool,
    pub moderate_comments: bool,
    pub show_feedback_to_guests: bool,
    pub show_guest_names: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
