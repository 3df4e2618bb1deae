//! Photo handlers
//!
//! Gallery grid listing, single photo lookup and the guest's own
//! likes/favorites filter.

use axum::{extract::State, Json};
use gallery_core::PhotoFilter;
use gallery_service::dto::{FilteredPhotosQuery, FilteredPhotosResponse, PhotoListQuery, PhotoResponse};
use gallery_service::{PhotoService, ServiceError};

use crate::extractors::{EventIdPath, GuestSession, PhotoIdPath, QueryParams, SnowflakePath};
use crate::response::ApiResult;
use crate::state::AppState;

/// List photos of an event
///
/// GET /events/{event_id}/photos?category=
pub async fn list_photos(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<EventIdPath>,
    QueryParams(query): QueryParams<PhotoListQuery>,
) -> ApiResult<Json<Vec<PhotoResponse>>> {
    let event_id = path.event_id()?;

    let service = PhotoService::new(state.service_context());
    let photos = service
        .list_photos(event_id, query.category.as_deref())
        .await?;
    Ok(Json(photos))
}

/// Photo ids matching the caller's likes and/or favorites
///
/// GET /events/{event_id}/photos/filtered?liked=&favorited=&operator=
pub async fn filtered_photos(
    State(state): State<AppState>,
    session: GuestSession,
    SnowflakePath(path): SnowflakePath<EventIdPath>,
    QueryParams(query): QueryParams<FilteredPhotosQuery>,
) -> ApiResult<Json<FilteredPhotosResponse>> {
    let event_id = path.event_id()?;
    let filter = PhotoFilter::try_from(query).map_err(ServiceError::from)?;

    let service = PhotoService::new(state.service_context());
    let response = service
        .filtered_photos(event_id, &session.guest, filter)
        .await?;
    Ok(Json(response))
}

/// GET /photos/{photo_id}
pub async fn get_photo(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<PhotoIdPath>,
) -> ApiResult<Json<PhotoResponse>> {
    let photo_id = path.photo_id()?;

    let service = PhotoService::new(state.service_context());
    Ok(Json(service.get_photo(photo_id).await?))
}
