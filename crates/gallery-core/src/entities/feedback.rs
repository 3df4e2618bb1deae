//! Feedback entity - one guest action (like, rating, comment, favorite) on a photo

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::AuditAction;
use crate::error::DomainError;
use crate::value_objects::{GuestIdentifier, Snowflake};

/// Kind of feedback a guest can leave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Like,
    Rating,
    Comment,
    Favorite,
}

impl FeedbackType {
    pub const ALL: [FeedbackType; 4] = [Self::Like, Self::Rating, Self::Comment, Self::Favorite];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Rating => "rating",
            Self::Comment => "comment",
            Self::Favorite => "favorite",
        }
    }

    /// Like and favorite flip on and off; rating and comment are edited in place
    #[inline]
    pub fn is_toggle(self) -> bool {
        matches!(self, Self::Like | Self::Favorite)
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "rating" => Ok(Self::Rating),
            "comment" => Ok(Self::Comment),
            "favorite" => Ok(Self::Favorite),
            other => Err(DomainError::InvalidFeedbackType(other.to_string())),
        }
    }
}

/// Validated payload of a feedback submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackContent {
    Like,
    Favorite,
    Rating(i16),
    Comment(String),
}

impl FeedbackContent {
    pub const MIN_RATING: i16 = 1;
    pub const MAX_RATING: i16 = 5;

    /// Validate raw submission fields.
    ///
    /// Fields that do not belong to the given type are ignored, so a like
    /// carrying a stray `rating` is still a plain like.
    pub fn parse(
        feedback_type: &str,
        rating: Option<f64>,
        comment: Option<&str>,
        max_comment_len: usize,
    ) -> Result<Self, DomainError> {
        match feedback_type.parse::<FeedbackType>()? {
            FeedbackType::Like => Ok(Self::Like),
            FeedbackType::Favorite => Ok(Self::Favorite),
            FeedbackType::Rating => {
                let value = rating.ok_or(DomainError::InvalidRating)?;
                let in_range = (f64::from(Self::MIN_RATING)..=f64::from(Self::MAX_RATING))
                    .contains(&value);
                if !in_range || value.fract() != 0.0 {
                    return Err(DomainError::InvalidRating);
                }
                Ok(Self::Rating(value as i16))
            }
            FeedbackType::Comment => {
                let text = comment.map(str::trim).unwrap_or_default();
                if text.is_empty() {
                    return Err(DomainError::EmptyComment);
                }
                if text.chars().count() > max_comment_len {
                    return Err(DomainError::ContentTooLong {
                        max: max_comment_len,
                    });
                }
                Ok(Self::Comment(text.to_string()))
            }
        }
    }

    pub fn feedback_type(&self) -> FeedbackType {
        match self {
            Self::Like => FeedbackType::Like,
            Self::Favorite => FeedbackType::Favorite,
            Self::Rating(_) => FeedbackType::Rating,
            Self::Comment(_) => FeedbackType::Comment,
        }
    }
}

/// Request metadata kept for audit purposes only; never used as identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Feedback entity.
///
/// At most one row exists per (event, photo, guest, feedback type).
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub id: Snowflake,
    pub event_id: Snowflake,
    pub photo_id: Snowflake,
    pub guest_identifier: GuestIdentifier,
    pub feedback_type: FeedbackType,
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

impl Feedback {
    pub fn new(
        id: Snowflake,
        event_id: Snowflake,
        photo_id: Snowflake,
        guest_identifier: GuestIdentifier,
        content: FeedbackContent,
        is_approved: bool,
    ) -> Self {
        let now = Utc::now();
        let feedback_type = content.feedback_type();
        let (rating, comment_text) = match content {
            FeedbackContent::Rating(r) => (Some(r), None),
            FeedbackContent::Comment(text) => (None, Some(text)),
            FeedbackContent::Like | FeedbackContent::Favorite => (None, None),
        };
        Self {
            id,
            event_id,
            photo_id,
            guest_identifier,
            feedback_type,
            rating,
            comment_text,
            guest_name: None,
            guest_email: None,
            ip_address: None,
            user_agent: None,
            is_approved,
            is_hidden: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_guest_details(mut self, name: Option<String>, email: Option<String>) -> Self {
        self.guest_name = name;
        self.guest_email = email;
        self
    }

    pub fn with_client_info(mut self, client: ClientInfo) -> Self {
        self.ip_address = client.ip_address;
        self.user_agent = client.user_agent;
        self
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.is_hidden
    }

    /// A comment waiting for a moderator
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.feedback_type == FeedbackType::Comment && !self.is_approved && !self.is_hidden
    }

    pub fn is_from(&self, guest: &GuestIdentifier) -> bool {
        &self.guest_identifier == guest
    }

    /// Drop guest name and email before showing the row to other guests
    pub fn strip_guest_details(&mut self) {
        self.guest_name = None;
        self.guest_email = None;
    }

    pub fn apply_moderation(&mut self, action: ModerationAction) {
        let (approved, hidden) = action.apply(self.is_approved);
        self.is_approved = approved;
        self.is_hidden = hidden;
        self.updated_at = Utc::now();
    }
}

/// Admin moderation transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Hide,
    Reject,
}

impl ModerationAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Hide => "hide",
            Self::Reject => "reject",
        }
    }

    /// Resulting `(is_approved, is_hidden)` pair
    pub fn apply(self, is_approved: bool) -> (bool, bool) {
        match self {
            Self::Approve => (true, false),
            Self::Hide => (is_approved, true),
            Self::Reject => (false, true),
        }
    }

    pub fn audit_action(self) -> AuditAction {
        match self {
            Self::Approve => AuditAction::FeedbackApproved,
            Self::Hide => AuditAction::FeedbackHidden,
            Self::Reject => AuditAction::FeedbackRejected,
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModerationAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" => Ok(Self::Approve),
            "hide" => Ok(Self::Hide),
            "reject" => Ok(Self::Reject),
            _ => Err(DomainError::InvalidModerationAction(s.to_string())),
        }
    }
}
