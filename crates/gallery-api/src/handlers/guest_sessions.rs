//! Guest session handlers

use axum::{extract::State, Json};
use gallery_service::dto::GuestSessionResponse;
use gallery_service::GuestSessionService;

use crate::extractors::{EventIdPath, OptionalGuestSession, SnowflakePath};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Start or resume a guest session for an event
///
/// POST /events/{event_id}/guest-session
pub async fn start_session(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<EventIdPath>,
    OptionalGuestSession(existing): OptionalGuestSession,
) -> ApiResult<Created<Json<GuestSessionResponse>>> {
    let event_id = path.event_id()?;

    let service = GuestSessionService::new(state.service_context());
    let session = service
        .start_session(event_id, existing.map(|s| s.guest))
        .await?;
    Ok(Created(Json(session)))
}
