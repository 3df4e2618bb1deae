//! Event feedback settings handlers

use axum::{extract::State, Json};
use gallery_service::dto::{FeedbackSettingsResponse, UpdateFeedbackSettingsRequest};
use gallery_service::SettingsService;

use crate::extractors::{AdminUser, EventIdPath, SnowflakePath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Current settings, or the defaults for an unconfigured event
///
/// GET /events/{event_id}/feedback/settings
pub async fn get_settings(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<EventIdPath>,
) -> ApiResult<Json<FeedbackSettingsResponse>> {
    let event_id = path.event_id()?;

    let service = SettingsService::new(state.service_context());
    Ok(Json(service.get_settings(event_id).await?))
}

/// Partial update; omitted fields keep their value
///
/// PATCH /events/{event_id}/feedback/settings
pub async fn update_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
    SnowflakePath(path): SnowflakePath<EventIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateFeedbackSettingsRequest>,
) -> ApiResult<Json<FeedbackSettingsResponse>> {
    let event_id = path.event_id()?;

    let service = SettingsService::new(state.service_context());
    let settings = service.update_settings(event_id, request.into()).await?;
    Ok(Json(settings))
}
