//! Domain errors - error types for the domain layer

use thiserror::Error;

use super::ErrorKind;
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Photo not found: {0}")]
    PhotoNotFound(Snowflake),

    #[error("Feedback not found: {0}")]
    FeedbackNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid feedback type: {0} (expected like, rating, comment or favorite)")]
    InvalidFeedbackType(String),

    #[error("Rating must be a whole number between 1 and 5")]
    InvalidRating,

    #[error("Comment text must not be empty")]
    EmptyComment,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Invalid moderation action: {0} (expected approve, hide or reject)")]
    InvalidModerationAction(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Feedback type {0} is disabled for this event")]
    FeedbackDisabled(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::PhotoNotFound(_) => "UNKNOWN_PHOTO",
            Self::FeedbackNotFound(_) => "UNKNOWN_FEEDBACK",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidFeedbackType(_) => "INVALID_FEEDBACK_TYPE",
            Self::InvalidRating => "INVALID_RATING",
            Self::EmptyComment => "EMPTY_COMMENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidModerationAction(_) => "INVALID_MODERATION_ACTION",

            Self::FeedbackDisabled(_) => "FEEDBACK_DISABLED",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PhotoNotFound(_) | Self::FeedbackNotFound(_) => ErrorKind::NotFound,
            Self::ValidationError(_)
            | Self::InvalidFeedbackType(_)
            | Self::InvalidRating
            | Self::EmptyComment
            | Self::ContentTooLong { .. }
            | Self::InvalidModerationAction(_) => ErrorKind::BadRequest,
            Self::FeedbackDisabled(_) => ErrorKind::Forbidden,
            Self::DatabaseError(_) | Self::InternalError(_) => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
