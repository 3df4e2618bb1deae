//! Feedback entity <-> model mapper

use gallery_core::entities::Feedback;
use gallery_core::error::DomainError;
use gallery_core::value_objects::{GuestIdentifier, Snowflake};

use crate::models::FeedbackModel;

impl TryFrom<FeedbackModel> for Feedback {
    type Error = DomainError;

    fn try_from(model: FeedbackModel) -> Result<Self, Self::Error> {
        Ok(Feedback {
            id: Snowflake::new(model.id),
            event_id: Snowflake::new(model.event_id),
            photo_id: Snowflake::new(model.photo_id),
            guest_identifier: GuestIdentifier::new(model.guest_identifier)?,
            feedback_type: model.feedback_type.parse()?,
            rating: model.rating,
            comment_text: model.comment_text,
            guest_name: model.guest_name,
            guest_email: model.guest_email,
            ip_address: model.ip_address,
            user_agent: model.user_agent,
            is_approved: model.is_approved,
            is_hidden: model.is_hidden,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Convert a batch of rows, failing on the first malformed one
pub(crate) fn into_feedback(models: Vec<FeedbackModel>) -> Result<Vec<Feedback>, DomainError> {
    models.into_iter().map(Feedback::try_from).collect()
}

/// Feedback values prepared for binding
pub struct FeedbackInsert<'a> {
    pub id: i64,
    pub event_id: i64,
    pub photo_id: i64,
    pub guest_identifier: &'a str,
    pub feedback_type: &'static str,
    pub rating: Option<i16>,
    pub comment_text: Option<&'a str>,
    pub guest_name: Option<&'a str>,
    pub guest_email: Option<&'a str>,
    pub ip_address: Option<&'a str>,
    pub user_agent: Option<&'a str>,
    pub is_approved: bool,
}

impl<'a> FeedbackInsert<'a> {
    pub fn new(feedback: &'a Feedback) -> Self {
        Self {
            id: feedback.id.into_inner(),
            event_id: feedback.event_id.into_inner(),
            photo_id: feedback.photo_id.into_inner(),
            guest_identifier: feedback.guest_identifier.as_str(),
            feedback_type: feedback.feedback_type.as_str(),
            rating: feedback.rating,
            comment_text: feedback.comment_text.as_deref(),
            guest_name: feedback.guest_name.as_deref(),
            guest_email: feedback.guest_email.as_deref(),
            ip_address: feedback.ip_address.as_deref(),
            user_agent: feedback.user_agent.as_deref(),
            is_approved: feedback.is_approved,
        }
    }
}
