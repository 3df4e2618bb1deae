//! Feedback settings entity <-> model mapper

use gallery_core::entities::FeedbackSettings;
use gallery_core::value_objects::Snowflake;

use crate::models::FeedbackSettingsModel;

impl From<FeedbackSettingsModel> for FeedbackSettings {
    fn from(model: FeedbackSettingsModel) -> Self {
        FeedbackSettings {
            event_id: Snowflake::new(model.event_id),
            feedback_enabled: model.feedback_enabled,
            allow_likes: model.allow_likes,
            allow_ratings: model.allow_ratings,
            allow_comments: model.allow_comments,
            allow_favorites: model.allow_favorites,
            moderate_comments: model.moderate_comments,
            show_feedback_to_guests: model.show_feedback_to_guests,
            show_guest_names: model.show_guest_names,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
