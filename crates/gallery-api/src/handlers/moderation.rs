//! Moderation handlers (organizers only)

use axum::{extract::State, Json};
use gallery_service::dto::{
    AuditEntryResponse, AuditLogQuery, FeedbackResponse, ModerateFeedbackRequest,
    ModerationResponse, PendingQuery,
};
use gallery_service::ModerationService;

use crate::extractors::{
    AdminUser, EventIdPath, FeedbackIdPath, QueryParams, SnowflakePath, ValidatedJson,
};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Comments awaiting approval
///
/// GET /moderation/pending?event_id=
pub async fn get_pending(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(query): QueryParams<PendingQuery>,
) -> ApiResult<Json<Vec<FeedbackResponse>>> {
    let service = ModerationService::new(state.service_context());
    Ok(Json(service.pending(query.event_id).await?))
}

/// POST /feedback/{feedback_id}/moderate
pub async fn moderate_feedback(
    State(state): State<AppState>,
    admin: AdminUser,
    SnowflakePath(path): SnowflakePath<FeedbackIdPath>,
    ValidatedJson(request): ValidatedJson<ModerateFeedbackRequest>,
) -> ApiResult<Json<ModerationResponse>> {
    let feedback_id = path.feedback_id()?;

    let service = ModerationService::new(state.service_context());
    let success = service
        .moderate(feedback_id, &request.action, admin.admin_id)
        .await?;

    Ok(Json(ModerationResponse {
        feedback_id: feedback_id.to_string(),
        action: request.action.trim().to_ascii_lowercase(),
        success,
    }))
}

/// DELETE /feedback/{feedback_id}
pub async fn delete_feedback(
    State(state): State<AppState>,
    admin: AdminUser,
    SnowflakePath(path): SnowflakePath<FeedbackIdPath>,
) -> ApiResult<NoContent> {
    let feedback_id = path.feedback_id()?;

    let service = ModerationService::new(state.service_context());
    service.delete(feedback_id, admin.admin_id).await?;
    Ok(NoContent)
}

/// GET /events/{event_id}/audit-log?limit=
pub async fn get_audit_log(
    State(state): State<AppState>,
    _admin: AdminUser,
    SnowflakePath(path): SnowflakePath<EventIdPath>,
    QueryParams(query): QueryParams<AuditLogQuery>,
) -> ApiResult<Json<Vec<AuditEntryResponse>>> {
    let event_id = path.event_id()?;

    let service = ModerationService::new(state.service_context());
    Ok(Json(service.audit_log(event_id, query.limit).await?))
}
