//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use gallery_core::Snowflake;
use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::json;

async fn guest_session(server: &TestServer, event_id: Snowflake) -> GuestSessionResponse {
    let response = server
        .post_empty(&format!("/api/v1/events/{event_id}/guest-session"))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn submit(
    server: &TestServer,
    token: &str,
    event_id: Snowflake,
    photo_id: Snowflake,
    request: &SubmitFeedbackRequest,
) -> reqwest::Response {
    server
        .post_auth(
            &format!("/api/v1/events/{event_id}/photos/{photo_id}/feedback"),
            token,
            request,
        )
        .await
        .unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Guest Session Tests
// ============================================================================

#[tokio::test]
async fn test_guest_session_is_event_scoped() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    let session = guest_session(&server, event_id).await;

    assert_eq!(session.event_id, event_id.to_string());
    assert_eq!(session.token_type, "Bearer");
    assert!(!session.guest_identifier.is_empty());

    // Refreshing with the same token keeps the identity
    let response = server
        .client
        .post(format!(
            "{}/api/v1/events/{event_id}/guest-session",
            server.base_url()
        ))
        .bearer_auth(&session.token)
        .send()
        .await
        .unwrap();
    let refreshed: GuestSessionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(refreshed.guest_identifier, session.guest_identifier);
}

#[tokio::test]
async fn test_token_for_other_event_is_forbidden() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_a = server.new_id();
    let event_b = server.new_id();
    let photo_b = server.seed_photo(event_b, None).await.unwrap();
    let session = guest_session(&server, event_a).await;

    let response = submit(&server, &session.token, event_b, photo_b, &SubmitFeedbackRequest::like()).await;
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "EVENT_MISMATCH");
}

#[tokio::test]
async fn test_submit_requires_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    let photo_id = server.seed_photo(event_id, None).await.unwrap();

    let response = server
        .post(
            &format!("/api/v1/events/{event_id}/photos/{photo_id}/feedback"),
            &SubmitFeedbackRequest::like(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Photo Tests
// ============================================================================

#[tokio::test]
async fn test_list_photos_by_category() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    let ceremony = server.seed_photo(event_id, Some("ceremony")).await.unwrap();
    server.seed_photo(event_id, Some("party")).await.unwrap();

    let response = server
        .get(&format!("/api/v1/events/{event_id}/photos"))
        .await
        .unwrap();
    let all: Vec<PhotoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(all.len(), 2);

    let response = server
        .get(&format!("/api/v1/events/{event_id}/photos?category=ceremony"))
        .await
        .unwrap();
    let filtered: Vec<PhotoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, ceremony.to_string());
}

#[tokio::test]
async fn test_unknown_photo() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server
        .get(&format!("/api/v1/photos/{}", server.new_id()))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_PHOTO");

    let response = server.get("/api/v1/photos/not-a-number").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Feedback Tests
// ============================================================================

#[tokio::test]
async fn test_like_toggles() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    let photo_id = server.seed_photo(event_id, None).await.unwrap();
    let session = guest_session(&server, event_id).await;

    let response = submit(&server, &session.token, event_id, photo_id, &SubmitFeedbackRequest::like()).await;
    let added: FeedbackSubmissionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(added.action, SubmissionAction::Added);
    assert_eq!(added.stats.like_count, 1);

    let response = submit(&server, &session.token, event_id, photo_id, &SubmitFeedbackRequest::like()).await;
    let removed: FeedbackSubmissionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(removed.action, SubmissionAction::Removed);
    assert!(removed.feedback.is_none());
    assert_eq!(removed.stats.like_count, 0);
}

#[tokio::test]
async fn test_rating_is_upserted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    let photo_id = server.seed_photo(event_id, None).await.unwrap();
    let first = guest_session(&server, event_id).await;
    let second = guest_session(&server, event_id).await;

    let response = submit(&server, &first.token, event_id, photo_id, &SubmitFeedbackRequest::rating(4.0)).await;
    let added: FeedbackSubmissionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(added.action, SubmissionAction::Added);

    let response = submit(&server, &first.token, event_id, photo_id, &SubmitFeedbackRequest::rating(2.0)).await;
    let updated: FeedbackSubmissionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.action, SubmissionAction::Updated);
    assert_eq!(updated.feedback.unwrap().rating, Some(2));

    let response = submit(&server, &second.token, event_id, photo_id, &SubmitFeedbackRequest::rating(5.0)).await;
    let stats = assert_json::<FeedbackSubmissionResponse>(response, StatusCode::OK)
        .await
        .unwrap()
        .stats;
    assert!((stats.average_rating - 3.5).abs() < f64::EPSILON);
    assert_eq!(stats.feedback_count, 2);
}

#[tokio::test]
async fn test_invalid_feedback_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    let photo_id = server.seed_photo(event_id, None).await.unwrap();
    let session = guest_session(&server, event_id).await;

    let cases = [
        (SubmitFeedbackRequest::rating(6.0), "INVALID_RATING"),
        (SubmitFeedbackRequest::rating(2.5), "INVALID_RATING"),
        (SubmitFeedbackRequest::comment("   "), "EMPTY_COMMENT"),
        (
            SubmitFeedbackRequest {
                feedback_type: "applause".to_string(),
                ..SubmitFeedbackRequest::default()
            },
            "INVALID_FEEDBACK_TYPE",
        ),
    ];

    for (request, code) in cases {
        let response = submit(&server, &session.token, event_id, photo_id, &request).await;
        let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(error.error.code, code);
    }

    let response = submit(
        &server,
        &session.token,
        event_id,
        server.new_id(),
        &SubmitFeedbackRequest::like(),
    )
    .await;
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_PHOTO");
}

#[tokio::test]
async fn test_filtered_photos() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    let both = server.seed_photo(event_id, None).await.unwrap();
    let liked_only = server.seed_photo(event_id, None).await.unwrap();
    server.seed_photo(event_id, None).await.unwrap();
    let session = guest_session(&server, event_id).await;

    for photo in [both, liked_only] {
        submit(&server, &session.token, event_id, photo, &SubmitFeedbackRequest::like()).await;
    }
    submit(&server, &session.token, event_id, both, &SubmitFeedbackRequest::favorite()).await;

    let path = format!("/api/v1/events/{event_id}/photos/filtered?liked=true&favorited=true");
    let response = server.get_auth(&path, &session.token).await.unwrap();
    let and: FilteredPhotosResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(and.photo_ids, vec![both.to_string()]);

    let response = server
        .get_auth(&format!("{path}&operator=OR"), &session.token)
        .await
        .unwrap();
    let or: FilteredPhotosResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(or.photo_ids.len(), 2);

    let response = server
        .get_auth(&format!("{path}&operator=XOR"), &session.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Settings Tests
// ============================================================================

#[tokio::test]
async fn test_settings_defaults_and_disabled_type() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    let photo_id = server.seed_photo(event_id, None).await.unwrap();
    let session = guest_session(&server, event_id).await;
    let settings_path = format!("/api/v1/events/{event_id}/feedback/settings");

    let response = server.get(&settings_path).await.unwrap();
    let defaults: FeedbackSettingsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(defaults.feedback_enabled);
    assert!(defaults.allow_ratings);
    assert!(!defaults.moderate_comments);

    // Guests cannot change settings
    let response = server
        .patch_auth(&settings_path, &session.token, &json!({ "allow_ratings": false }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let admin = server.admin_token().unwrap();
    let response = server
        .patch_auth(&settings_path, &admin, &json!({ "allow_ratings": false }))
        .await
        .unwrap();
    let updated: FeedbackSettingsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!updated.allow_ratings);
    assert!(updated.allow_likes);

    let response = submit(&server, &session.token, event_id, photo_id, &SubmitFeedbackRequest::rating(3.0)).await;
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "FEEDBACK_DISABLED");
}

// ============================================================================
// Moderation Tests
// ============================================================================

#[tokio::test]
async fn test_moderated_comment_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    let photo_id = server.seed_photo(event_id, None).await.unwrap();
    let session = guest_session(&server, event_id).await;
    let admin = server.admin_token().unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/events/{event_id}/feedback/settings"),
            &admin,
            &json!({ "moderate_comments": true }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = submit(
        &server,
        &session.token,
        event_id,
        photo_id,
        &SubmitFeedbackRequest::comment("Lovely light"),
    )
    .await;
    let submitted: FeedbackSubmissionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let comment = submitted.feedback.unwrap();
    assert!(!comment.is_approved);

    // Anonymous readers only see approved feedback
    let feedback_path = format!("/api/v1/photos/{photo_id}/feedback");
    let response = server.get(&feedback_path).await.unwrap();
    let visible: Vec<FeedbackResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(visible.is_empty());

    let response = server
        .get_auth(&format!("/api/v1/moderation/pending?event_id={event_id}"), &admin)
        .await
        .unwrap();
    let pending: Vec<FeedbackResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, comment.id);

    let response = server
        .post_auth(
            &format!("/api/v1/feedback/{}/moderate", comment.id),
            &admin,
            &ModerateRequest::new("approve"),
        )
        .await
        .unwrap();
    let moderation: ModerationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(moderation.success);

    let response = server.get(&feedback_path).await.unwrap();
    let visible: Vec<FeedbackResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(visible.len(), 1);

    let response = server
        .get_auth(&format!("/api/v1/events/{event_id}/audit-log"), &admin)
        .await
        .unwrap();
    let log: Vec<AuditEntry> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].action, "feedback_approved");
    assert_eq!(log[0].target_id, comment.id);
}

#[tokio::test]
async fn test_moderation_errors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().unwrap();
    let unknown = server.new_id();

    let response = server
        .post_auth(
            &format!("/api/v1/feedback/{unknown}/moderate"),
            &admin,
            &ModerateRequest::new("approve"),
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_FEEDBACK");

    let response = server
        .post_auth(
            &format!("/api/v1/feedback/{unknown}/moderate"),
            &admin,
            &ModerateRequest::new("promote"),
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_MODERATION_ACTION");

    let response = server
        .delete_auth(&format!("/api/v1/feedback/{unknown}"), &admin)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_feedback_updates_stats() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    let photo_id = server.seed_photo(event_id, None).await.unwrap();
    let session = guest_session(&server, event_id).await;
    let admin = server.admin_token().unwrap();

    let response = submit(&server, &session.token, event_id, photo_id, &SubmitFeedbackRequest::favorite()).await;
    let submitted: FeedbackSubmissionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let feedback_id = submitted.feedback.unwrap().id;

    let response = server
        .delete_auth(&format!("/api/v1/feedback/{feedback_id}"), &admin)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("/api/v1/photos/{photo_id}")).await.unwrap();
    let photo: PhotoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(photo.favorite_count, 0);
    assert_eq!(photo.feedback_count, 0);
}

// ============================================================================
// Reporting Tests
// ============================================================================

#[tokio::test]
async fn test_summary_and_export() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    let photo_id = server.seed_photo(event_id, None).await.unwrap();
    let session = guest_session(&server, event_id).await;
    let admin = server.admin_token().unwrap();

    submit(&server, &session.token, event_id, photo_id, &SubmitFeedbackRequest::like()).await;
    submit(
        &server,
        &session.token,
        event_id,
        photo_id,
        &SubmitFeedbackRequest::comment("Great, \"candid\" shot"),
    )
    .await;

    let response = server
        .get(&format!("/api/v1/events/{event_id}/feedback/summary"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/events/{event_id}/feedback/summary"), &admin)
        .await
        .unwrap();
    let summary: EventSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.summary.total_feedback, 2);
    assert_eq!(summary.summary.total_likes, 1);
    assert_eq!(summary.summary.total_comments, 1);
    assert_eq!(summary.summary.unique_guests, 1);

    let response = server
        .get_auth(&format!("/api/v1/events/{event_id}/feedback/export?format=csv"), &admin)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let csv = response.text().await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,photo_id,photo_filename,feedback_type"));
    assert!(csv.contains("\"Great, \"\"candid\"\" shot\""));

    let response = server
        .get_auth(&format!("/api/v1/events/{event_id}/feedback/export"), &admin)
        .await
        .unwrap();
    let rows: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rows.len(), 2);
}
