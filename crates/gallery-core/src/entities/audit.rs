//! Audit log entry - records admin actions on guest feedback

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::Feedback;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    FeedbackApproved,
    FeedbackHidden,
    FeedbackRejected,
    FeedbackDeleted,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FeedbackApproved => "feedback_approved",
            Self::FeedbackHidden => "feedback_hidden",
            Self::FeedbackRejected => "feedback_rejected",
            Self::FeedbackDeleted => "feedback_deleted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feedback_approved" => Ok(Self::FeedbackApproved),
            "feedback_hidden" => Ok(Self::FeedbackHidden),
            "feedback_rejected" => Ok(Self::FeedbackRejected),
            "feedback_deleted" => Ok(Self::FeedbackDeleted),
            other => Err(DomainError::InternalError(format!("unknown audit action: {other}"))),
        }
    }
}

/// Audit log entry
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub id: Snowflake,
    pub event_id: Snowflake,
    pub actor_id: Snowflake,
    pub action: AuditAction,
    pub target_id: Snowflake,
    pub target_type: String,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Entry targeting a feedback row; details carry the row's type and photo
    pub fn for_feedback(
        id: Snowflake,
        actor_id: Snowflake,
        action: AuditAction,
        feedback: &Feedback,
    ) -> Self {
        Self {
            id,
            event_id: feedback.event_id,
            actor_id,
            action,
            target_id: feedback.id,
            target_type: "feedback".to_string(),
            details: serde_json::json!({
                "feedback_type": feedback.feedback_type.as_str(),
                "photo_id": feedback.photo_id.to_string(),
            }),
            created_at: Utc::now(),
        }
    }
}
