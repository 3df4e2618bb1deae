//! Entity to DTO mappers

use gallery_core::entities::{AuditEntry, Feedback, FeedbackSettings, Photo};

use super::responses::{
    AuditEntryResponse, FeedbackExportRow, FeedbackResponse, FeedbackSettingsResponse,
    PhotoResponse,
};

// ============================================================================
// Photo Mappers
// ============================================================================

impl From<&Photo> for PhotoResponse {
    fn from(photo: &Photo) -> Self {
        Self {
            id: photo.id.to_string(),
            event_id: photo.event_id.to_string(),
            filename: photo.filename.clone(),
            url: photo.url.clone(),
            thumbnail_url: photo.thumbnail_url.clone(),
            category: photo.category.clone(),
            photo_type: photo.photo_type,
            comment_count: photo.comment_count,
            like_count: photo.like_count,
            favorite_count: photo.favorite_count,
            average_rating: photo.average_rating,
            feedback_count: photo.feedback_count,
            created_at: photo.created_at,
        }
    }
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        Self::from(&photo)
    }
}

// ============================================================================
// Feedback Mappers
// ============================================================================

/// Admin view: includes the guest identifier
impl From<&Feedback> for FeedbackResponse {
    fn from(feedback: &Feedback) -> Self {
        Self {
            id: feedback.id.to_string(),
            event_id: feedback.event_id.to_string(),
            photo_id: feedback.photo_id.to_string(),
            feedback_type: feedback.feedback_type,
            rating: feedback.rating,
            comment_text: feedback.comment_text.clone(),
            guest_name: feedback.guest_name.clone(),
            guest_email: feedback.guest_email.clone(),
            guest_identifier: Some(feedback.guest_identifier.as_str().to_string()),
            is_approved: feedback.is_approved,
            is_hidden: feedback.is_hidden,
            created_at: feedback.created_at,
            updated_at: feedback.updated_at,
        }
    }
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self::from(&feedback)
    }
}

impl FeedbackResponse {
    /// Guest view: never exposes other guests' identifiers
    pub fn for_guest(feedback: &Feedback) -> Self {
        Self {
            guest_identifier: None,
            ..Self::from(feedback)
        }
    }
}

impl FeedbackExportRow {
    pub fn new(feedback: &Feedback, photo_filename: Option<String>) -> Self {
        Self {
            id: feedback.id.to_string(),
            photo_id: feedback.photo_id.to_string(),
            photo_filename,
            feedback_type: feedback.feedback_type,
            rating: feedback.rating,
            comment_text: feedback.comment_text.clone(),
            guest_identifier: feedback.guest_identifier.as_str().to_string(),
            guest_name: feedback.guest_name.clone(),
            guest_email: feedback.guest_email.clone(),
            ip_address: feedback.ip_address.clone(),
            user_agent: feedback.user_agent.clone(),
            is_approved: feedback.is_approved,
            is_hidden: feedback.is_hidden,
            created_at: feedback.created_at,
        }
    }
}

// ============================================================================
// Settings and Audit Mappers
// ============================================================================

impl From<&FeedbackSettings> for FeedbackSettingsResponse {
    fn from(settings: &FeedbackSettings) -> Self {
        Self {
            event_id: settings.event_id.to_string(),
            feedback_enabled: settings.feedback_enabled,
            allow_likes: settings.allow_likes,
            allow_ratings: settings.allow_ratings,
            allow_comments: settings.allow_comments,
            allow_favorites: settings.allow_favorites,
            moderate_comments: settings.moderate_comments,
            show_feedback_to_guests: settings.show_feedback_to_guests,
            show_guest_names: settings.show_guest_names,
        }
    }
}

impl From<FeedbackSettings> for FeedbackSettingsResponse {
    fn from(settings: FeedbackSettings) -> Self {
        Self::from(&settings)
    }
}

impl From<&AuditEntry> for AuditEntryResponse {
    fn from(entry: &AuditEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            event_id: entry.event_id.to_string(),
            actor_id: entry.actor_id.to_string(),
            action: entry.action.as_str().to_string(),
            target_id: entry.target_id.to_string(),
            target_type: entry.target_type.clone(),
            details: entry.details.clone(),
            created_at: entry.created_at,
        }
    }
}
