//! Route definitions
//!
//! API routes are mounted under /api/v1. Health routes are exported
//! separately so they can sit outside the rate limiter.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{feedback, guest_sessions, health, moderation, photos, settings};
use crate::state::AppState;

/// Create the main API router (excluding health)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(event_routes())
        .merge(photo_routes())
        .merge(moderation_routes())
}

/// Event-scoped routes
fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events/:event_id/guest-session",
            post(guest_sessions::start_session),
        )
        // Gallery
        .route("/events/:event_id/photos", get(photos::list_photos))
        .route(
            "/events/:event_id/photos/filtered",
            get(photos::filtered_photos),
        )
        .route(
            "/events/:event_id/photos/:photo_id/feedback",
            post(feedback::submit_feedback),
        )
        // Settings
        .route(
            "/events/:event_id/feedback/settings",
            get(settings::get_settings).patch(settings::update_settings),
        )
        // Organizer views
        .route(
            "/events/:event_id/feedback/summary",
            get(feedback::get_event_summary),
        )
        .route(
            "/events/:event_id/feedback/export",
            get(feedback::export_event_feedback),
        )
        .route("/events/:event_id/audit-log", get(moderation::get_audit_log))
}

fn photo_routes() -> Router<AppState> {
    Router::new()
        .route("/photos/:photo_id", get(photos::get_photo))
        .route("/photos/:photo_id/feedback", get(feedback::get_photo_feedback))
}

fn moderation_routes() -> Router<AppState> {
    Router::new()
        .route("/moderation/pending", get(moderation::get_pending))
        .route(
            "/feedback/:feedback_id/moderate",
            post(moderation::moderate_feedback),
        )
        .route("/feedback/:feedback_id", delete(moderation::delete_feedback))
}
