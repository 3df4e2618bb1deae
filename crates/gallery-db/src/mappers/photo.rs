//! Photo entity <-> model mapper

use gallery_core::entities::{Photo, PhotoType};
use gallery_core::value_objects::Snowflake;

use crate::models::PhotoModel;

/// Unknown layouts render as single photos
fn parse_photo_type(raw: &str) -> PhotoType {
    raw.parse().unwrap_or_default()
}

impl From<PhotoModel> for Photo {
    fn from(model: PhotoModel) -> Self {
        Photo {
            id: Snowflake::new(model.id),
            event_id: Snowflake::new(model.event_id),
            filename: model.filename,
            url: model.url,
            thumbnail_url: model.thumbnail_url,
            category: model.category,
            photo_type: parse_photo_type(&model.photo_type),
            comment_count: model.comment_count,
            like_count: model.like_count,
            favorite_count: model.favorite_count,
            average_rating: model.average_rating,
            feedback_count: model.feedback_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
