//! Per-event feedback settings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::FeedbackType;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Event feedback configuration. Absent rows read as [`FeedbackSettings::defaults_for`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSettings {
    pub event_id: Snowflake,
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

impl FeedbackSettings {
    /// Everything enabled, no moderation, feedback visible to guests
    pub fn defaults_for(event_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            event_id,
            feedback_enabled: true,
            allow_likes: true,
            allow_ratings: true,
            allow_comments: true,
            allow_favorites: true,
            moderate_comments: false,
            show_feedback_to_guests: true,
            show_guest_names: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn allows(&self, feedback_type: FeedbackType) -> bool {
        self.feedback_enabled
            && match feedback_type {
                FeedbackType::Like => self.allow_likes,
                FeedbackType::Rating => self.allow_ratings,
                FeedbackType::Comment => self.allow_comments,
                FeedbackType::Favorite => self.allow_favorites,
            }
    }

    pub fn ensure_allows(&self, feedback_type: FeedbackType) -> Result<(), DomainError> {
        if self.allows(feedback_type) {
            Ok(())
        } else {
            Err(DomainError::FeedbackDisabled(feedback_type.to_string()))
        }
    }

    /// Approval state for a freshly inserted row
    pub fn initial_approval(&self, feedback_type: FeedbackType) -> bool {
        !(feedback_type == FeedbackType::Comment && self.moderate_comments)
    }

    pub fn apply(&mut self, patch: &FeedbackSettingsPatch) {
        let fields = [
            (&mut self.feedback_enabled, patch.feedback_enabled),
            (&mut self.allow_likes, patch.allow_likes),
            (&mut self.allow_ratings, patch.allow_ratings),
            (&mut self.allow_comments, patch.allow_comments),
            (&mut self.allow_favorites, patch.allow_favorites),
            (&mut self.moderate_comments, patch.moderate_comments),
            (&mut self.show_feedback_to_guests, patch.show_feedback_to_guests),
            (&mut self.show_guest_names, patch.show_guest_names),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        self.updated_at = Utc::now();
    }
}

/// Partial settings update; `None` leaves a flag as it is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSettingsPatch {
    pub feedback_enabled: Option<bool>,
    pub allow_likes: Option<bool>,
    pub allow_ratings: Option<bool>,
    pub allow_comments: Option<bool>,
    pub allow_favorites: Option<bool>,
    pub moderate_comments: Option<bool>,
    pub show_feedback_to_guests: Option<bool>,
    pub show_guest_names: Option<bool>,
}

impl FeedbackSettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// What happens to the approval flag when a guest edits an existing comment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentEditApproval {
    /// Edited comments are always approved
    #[default]
    AutoApprove,
    /// Edited comments go back to pending when the event moderates comments
    Moderated,
}

impl CommentEditApproval {
    /// Approval state written when an existing row is edited
    pub fn approve_on_update(self, feedback_type: FeedbackType, settings: &FeedbackSettings) -> bool {
        match (feedback_type, self) {
            (FeedbackType::Comment, Self::Moderated) => !settings.moderate_comments,
            _ => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AutoApprove => "auto_approve",
            Self::Moderated => "moderated",
        }
    }
}

impl fmt::Display for CommentEditApproval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentEditApproval {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto_approve" | "auto" => Ok(Self::AutoApprove),
            "moderated" => Ok(Self::Moderated),
            other => Err(DomainError::ValidationError(format!(
                "unknown comment edit approval policy: {other}"
            ))),
        }
    }
}
