//! End-to-end tests for gallery-client against a running server
//!
//! Same requirements as `api_tests`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gallery_client::{
    BulkDownloader, ClickOutcome, ClientError, GalleryClient, GallerySelection,
    HttpPhotoDownloader, Modifiers, Notification, Notifier,
};
use gallery_core::FilterOperator;
use integration_tests::{check_test_env, fixtures::*, unique_suffix, TestServer};

#[derive(Clone, Default)]
struct CompletionCounter(Arc<AtomicUsize>);

impl Notifier for CompletionCounter {
    fn notify(&self, notification: Notification) {
        if let Notification::Completed { succeeded, .. } = notification {
            self.0.store(succeeded, Ordering::SeqCst);
        }
    }
}

#[tokio::test]
async fn test_client_feedback_round() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    let photo_id = server.seed_photo(event_id, None).await.unwrap();
    let event = event_id.to_string();
    let photo = photo_id.to_string();

    let client = GalleryClient::new(server.base_url());
    let err = client
        .submit_feedback(&event, &photo, &SubmitFeedbackRequest::like())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NoSession));

    let session = client.start_guest_session(&event).await.unwrap();
    assert_eq!(client.token().as_deref(), Some(session.token.as_str()));

    let settings = client.feedback_settings(&event).await.unwrap();
    assert!(settings.allow_favorites);

    let submitted = client
        .submit_feedback(&event, &photo, &SubmitFeedbackRequest::favorite())
        .await
        .unwrap();
    assert_eq!(submitted.action, SubmissionAction::Added);

    let filtered = client
        .filtered_photos(&event, false, true, FilterOperator::And)
        .await
        .unwrap();
    assert_eq!(filtered.photo_ids, vec![photo.clone()]);

    let err = client
        .submit_feedback(&event, &photo, &SubmitFeedbackRequest::rating(9.0))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.code(), Some("INVALID_RATING"));
}

#[tokio::test]
async fn test_select_and_bulk_download() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let event_id = server.new_id();
    for _ in 0..3 {
        server.seed_downloadable_photo(event_id).await.unwrap();
    }

    let client = Arc::new(GalleryClient::new(server.base_url()));
    let photos = client
        .list_photos(&event_id.to_string(), None)
        .await
        .unwrap();
    assert_eq!(photos.len(), 3);

    let mut selection = GallerySelection::new(photos);
    let first = selection.visible()[0].id.clone();
    assert_eq!(selection.click(&first, Modifiers::CTRL), ClickOutcome::Selected);
    selection.select_all();
    assert_eq!(selection.selected_count(), 3);

    let target = std::env::temp_dir().join(format!(
        "gallery-download-{}-{}",
        std::process::id(),
        unique_suffix()
    ));
    let completed = CompletionCounter::default();
    let downloader = BulkDownloader::new(HttpPhotoDownloader::new(client, &target), completed.clone());

    let report = downloader
        .download(&selection.selected_photos())
        .await
        .unwrap();
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed, 0);
    assert_eq!(completed.0.load(Ordering::SeqCst), 3);
    for path in &report.paths {
        assert!(path.starts_with(&target));
        assert!(tokio::fs::metadata(path).await.unwrap().len() > 0);
    }

    tokio::fs::remove_dir_all(&target).await.ok();
}
