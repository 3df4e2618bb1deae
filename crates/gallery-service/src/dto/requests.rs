//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and `Validate`; query strings only `Deserialize`.

use gallery_core::{
    DomainError, FeedbackSettingsPatch, FeedbackType, FilterOperator, PhotoFilter, Snowflake,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Feedback Requests
// ============================================================================

/// Guest feedback submission
///
/// `rating` is read as a number so that fractional values can be rejected
/// with a rating error rather than a JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SubmitFeedbackRequest {
    pub feedback_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, alias = "comment", skip_serializing_if = "Option::is_none")]
    pub comment_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "Guest name must be at most 100 characters"))]
    pub guest_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub guest_email: Option<String>,
}

impl SubmitFeedbackRequest {
    pub fn like() -> Self {
        Self::of_type("like")
    }

    pub fn favorite() -> Self {
        Self::of_type("favorite")
    }

    pub fn rating(value: f64) -> Self {
        Self {
            rating: Some(value),
            ..Self::of_type("rating")
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            comment_text: Some(text.into()),
            ..Self::of_type("comment")
        }
    }

    fn of_type(feedback_type: &str) -> Self {
        Self {
            feedback_type: feedback_type.to_string(),
            ..Self::default()
        }
    }
}

/// Moderation action on one feedback row
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ModerateFeedbackRequest {
    /// `approve`, `hide` or `reject`
    pub action: String,
}

// ============================================================================
// Settings Requests
// ============================================================================

/// Partial settings update; absent fields keep their current value
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct UpdateFeedbackSettingsRequest {
    pub feedback_enabled: Option<bool>,
    pub allow_likes: Option<bool>,
    pub allow_ratings: Option<bool>,
    pub allow_comments: Option<bool>,
    pub allow_favorites: Option<bool>,
    pub moderate_comments: Option<bool>,
    pub show_feedback_to_guests: Option<bool>,
    pub show_guest_names: Option<bool>,
}

impl From<UpdateFeedbackSettingsRequest> for FeedbackSettingsPatch {
    fn from(req: UpdateFeedbackSettingsRequest) -> Self {
        Self {
            feedback_enabled: req.feedback_enabled,
            allow_likes: req.allow_likes,
            allow_ratings: req.allow_ratings,
            allow_comments: req.allow_comments,
            allow_favorites: req.allow_favorites,
            moderate_comments: req.moderate_comments,
            show_feedback_to_guests: req.show_feedback_to_guests,
            show_guest_names: req.show_guest_names,
        }
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoListQuery {
    pub category: Option<String>,
}

/// `?liked=true&favorited=true&operator=or`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilteredPhotosQuery {
    pub liked: Option<bool>,
    pub favorited: Option<bool>,
    pub operator: Option<String>,
}

impl TryFrom<FilteredPhotosQuery> for PhotoFilter {
    type Error = DomainError;

    fn try_from(query: FilteredPhotosQuery) -> Result<Self, Self::Error> {
        let operator = match query.operator.as_deref().map(str::trim) {
            None | Some("") => FilterOperator::default(),
            Some(raw) => raw.parse()?,
        };
        Ok(PhotoFilter {
            liked: query.liked.unwrap_or(false),
            favorited: query.favorited.unwrap_or(false),
            operator,
        })
    }
}

/// Filters for a photo's feedback list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoFeedbackQuery {
    pub feedback_type: Option<String>,
    pub approved_only: Option<bool>,
    pub include_hidden: Option<bool>,
    /// Admin only: restrict to one guest
    pub guest_identifier: Option<String>,
    /// Guest only: restrict to the caller's own rows
    pub mine: Option<bool>,
}

impl PhotoFeedbackQuery {
    /// # Errors
    /// Returns `InvalidFeedbackType` for an unknown type name
    pub fn feedback_type(&self) -> Result<Option<FeedbackType>, DomainError> {
        self.feedback_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<FeedbackType>)
            .transpose()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PendingQuery {
    pub event_id: Option<Snowflake>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogQuery {
    pub limit: Option<i64>,
}
