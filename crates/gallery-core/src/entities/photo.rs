//! Photo entity - an image in an event gallery with denormalized feedback counters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::PhotoStats;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Photo layout discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoType {
    #[default]
    Single,
    Collage,
}

impl PhotoType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Collage => "collage",
        }
    }
}

impl fmt::Display for PhotoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhotoType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "photo" => Ok(Self::Single),
            "collage" => Ok(Self::Collage),
            other => Err(DomainError::ValidationError(format!("unknown photo type: {other}"))),
        }
    }
}

/// Photo entity.
///
/// Created by the upload pipeline. Inside this service only the aggregator
/// writes to it, through [`Photo::apply_stats`] or the repository's
/// `update_stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: Snowflake,
    pub event_id: Snowflake,
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
    pub updated_at: DateTime<Utc>,
}

impl Photo {
    /// Create a photo with zeroed counters
    pub fn new(id: Snowflake, event_id: Snowflake, filename: String, url: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            event_id,
            filename,
            url,
            thumbnail_url: None,
            category: None,
            photo_type: PhotoType::Single,
            comment_count: 0,
            like_count: 0,
            favorite_count: 0,
            average_rating: 0.0,
            feedback_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn belongs_to(&self, event_id: Snowflake) -> bool {
        self.event_id == event_id
    }

    /// Case-insensitive category match; `None` matches every photo
    pub fn in_category(&self, category: Option<&str>) -> bool {
        match (category, self.category.as_deref()) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual),
            (Some(_), None) => false,
        }
    }

    pub fn apply_stats(&mut self, stats: &PhotoStats) {
        self.comment_count = stats.comment_count;
        self.like_count = stats.like_count;
        self.favorite_count = stats.favorite_count;
        self.average_rating = stats.average_rating;
        self.feedback_count = stats.feedback_count;
        self.updated_at = Utc::now();
    }

    pub fn stats(&self) -> PhotoStats {
        PhotoStats {
            comment_count: self.comment_count,
            like_count: self.like_count,
            favorite_count: self.favorite_count,
            average_rating: self.average_rating,
            feedback_count: self.feedback_count,
        }
    }
}
