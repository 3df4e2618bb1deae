//! Feedback handlers
//!
//! Guest submissions, per-photo feedback lists, and the organizer's event
//! summary and export.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use gallery_service::dto::{
    render_csv, EventSummaryResponse, ExportFormat, ExportQuery, FeedbackResponse,
    FeedbackSubmissionResponse, PhotoFeedbackQuery, SubmitFeedbackRequest,
};
use gallery_service::{FeedbackService, ServiceError};

use crate::extractors::{
    AdminUser, EventIdPath, EventPhotoPath, GuestSession, PhotoIdPath, QueryParams,
    RequestClientInfo, RequestViewer, SnowflakePath, ValidatedJson,
};
use crate::response::{ApiResult, CsvAttachment};
use crate::state::AppState;

/// Submit feedback on a photo
///
/// POST /events/{event_id}/photos/{photo_id}/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    session: GuestSession,
    SnowflakePath(path): SnowflakePath<EventPhotoPath>,
    RequestClientInfo(client): RequestClientInfo,
    ValidatedJson(request): ValidatedJson<SubmitFeedbackRequest>,
) -> ApiResult<Json<FeedbackSubmissionResponse>> {
    let event_id = path.event_id()?;
    let photo_id = path.photo_id()?;

    let service = FeedbackService::new(state.service_context());
    let response = service
        .submit_feedback(event_id, photo_id, &session.guest, request, client)
        .await?;
    Ok(Json(response))
}

/// Feedback on one photo, filtered by the caller's visibility
///
/// GET /photos/{photo_id}/feedback?feedback_type=&approved_only=&include_hidden=&mine=
pub async fn get_photo_feedback(
    State(state): State<AppState>,
    RequestViewer(viewer): RequestViewer,
    SnowflakePath(path): SnowflakePath<PhotoIdPath>,
    QueryParams(query): QueryParams<PhotoFeedbackQuery>,
) -> ApiResult<Json<Vec<FeedbackResponse>>> {
    let photo_id = path.photo_id()?;

    let service = FeedbackService::new(state.service_context());
    let rows = service.get_photo_feedback(photo_id, &viewer, &query).await?;
    Ok(Json(rows))
}

/// GET /events/{event_id}/feedback/summary
pub async fn get_event_summary(
    State(state): State<AppState>,
    _admin: AdminUser,
    SnowflakePath(path): SnowflakePath<EventIdPath>,
) -> ApiResult<Json<EventSummaryResponse>> {
    let event_id = path.event_id()?;

    let service = FeedbackService::new(state.service_context());
    Ok(Json(service.get_event_summary(event_id).await?))
}

/// Every feedback row of an event as JSON or CSV
///
/// GET /events/{event_id}/feedback/export?format=json|csv
pub async fn export_event_feedback(
    State(state): State<AppState>,
    admin: AdminUser,
    SnowflakePath(path): SnowflakePath<EventIdPath>,
    QueryParams(query): QueryParams<ExportQuery>,
) -> ApiResult<Response> {
    let event_id = path.event_id()?;
    let format: ExportFormat = query.format.as_deref().unwrap_or_default().parse().map_err(ServiceError::from)?;

    let service = FeedbackService::new(state.service_context());
    let rows = service.export_event_feedback(event_id).await?;

    tracing::info!(
        event_id = %event_id,
        admin_id = %admin.admin_id,
        rows = rows.len(),
        format = ?format,
        "Feedback exported"
    );

    Ok(match format {
        ExportFormat::Json => Json(rows).into_response(),
        ExportFormat::Csv => CsvAttachment {
            filename: format!("feedback-{event_id}.csv"),
            body: render_csv(&rows),
        }
        .into_response(),
    })
}
