//! Photo database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the photos table
#[derive(Debug, Clone, FromRow)]
pub struct PhotoModel {
    pub id: i64,
    pub event_id: i64,
    pub filename: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
    pub photo_type: String,
    pub comment_count: i32,
    pub like_count: i32,
    pub favorite_count: i32,
    pub average_rating: f64,
    pub feedback_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
