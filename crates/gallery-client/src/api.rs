//! HTTP client for the gallery feedback API

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use gallery_core::FilterOperator;
use gallery_service::dto::{
    FeedbackSettingsResponse, FeedbackSubmissionResponse, FilteredPhotosResponse,
    GuestSessionResponse, PhotoResponse, SubmitFeedbackRequest,
};
use parking_lot::RwLock;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::download::PhotoDownloader;
use crate::error::{ClientError, ClientResult};

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Map a non-success response body to [`ClientError::Api`]
fn api_error(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => ClientError::Api {
            status,
            code: envelope.error.code,
            message: envelope.error.message,
        },
        Err(_) => ClientError::Api {
            status,
            code: "UNKNOWN".to_string(),
            message: body.to_string(),
        },
    }
}

async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(api_error(status.as_u16(), &body))
}

async fn parse<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    Ok(check(response).await?.json().await?)
}

/// Client for one gallery server.
///
/// Holds the guest session token once [`GalleryClient::start_guest_session`]
/// has run; guest-only calls fail with [`ClientError::NoSession`] before that.
pub struct GalleryClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl GalleryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    /// Reuse a token from an earlier session
    pub fn with_token(self, token: impl Into<String>) -> Self {
        *self.token.write() = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn with_session(&self, request: RequestBuilder) -> ClientResult<RequestBuilder> {
        let token = self.token().ok_or(ClientError::NoSession)?;
        Ok(request.bearer_auth(token))
    }

    /// Start a guest session, or refresh the current one for the same event
    pub async fn start_guest_session(&self, event_id: &str) -> ClientResult<GuestSessionResponse> {
        let mut request = self
            .http
            .post(self.url(&format!("/events/{event_id}/guest-session")));
        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }

        let session: GuestSessionResponse = parse(request.send().await?).await?;
        *self.token.write() = Some(session.token.clone());
        debug!(event_id, "Guest session started");
        Ok(session)
    }

    pub async fn list_photos(
        &self,
        event_id: &str,
        category: Option<&str>,
    ) -> ClientResult<Vec<PhotoResponse>> {
        let mut request = self.http.get(self.url(&format!("/events/{event_id}/photos")));
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }
        parse(request.send().await?).await
    }

    pub async fn submit_feedback(
        &self,
        event_id: &str,
        photo_id: &str,
        feedback: &SubmitFeedbackRequest,
    ) -> ClientResult<FeedbackSubmissionResponse> {
        let request = self
            .http
            .post(self.url(&format!("/events/{event_id}/photos/{photo_id}/feedback")))
            .json(feedback);
        parse(self.with_session(request)?.send().await?).await
    }

    /// Ids of photos the current guest liked and/or favorited
    pub async fn filtered_photos(
        &self,
        event_id: &str,
        liked: bool,
        favorited: bool,
        operator: FilterOperator,
    ) -> ClientResult<FilteredPhotosResponse> {
        let request = self
            .http
            .get(self.url(&format!("/events/{event_id}/photos/filtered")))
            .query(&[
                ("liked", liked.to_string()),
                ("favorited", favorited.to_string()),
                ("operator", operator.to_string()),
            ]);
        parse(self.with_session(request)?.send().await?).await
    }

    pub async fn feedback_settings(&self, event_id: &str) -> ClientResult<FeedbackSettingsResponse> {
        let request = self
            .http
            .get(self.url(&format!("/events/{event_id}/feedback/settings")));
        parse(request.send().await?).await
    }

    /// Raw bytes of a photo file
    pub async fn photo_bytes(&self, url: &str) -> ClientResult<Vec<u8>> {
        let response = check(self.http.get(url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Writes downloaded photos into a directory as `{photo id}_{filename}`
pub struct HttpPhotoDownloader {
    client: Arc<GalleryClient>,
    target_dir: PathBuf,
}

impl HttpPhotoDownloader {
    pub fn new(client: Arc<GalleryClient>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            target_dir: target_dir.into(),
        }
    }

    /// Destination for a photo: the filename without directory components,
    /// prefixed with the photo id so same-named uploads stay distinct
    fn destination(&self, photo_id: &str, filename: &str) -> ClientResult<PathBuf> {
        let name = Path::new(filename)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ClientError::InvalidFilename(filename.to_string()))?;
        if photo_id.is_empty() || photo_id.contains(['/', '\\']) || photo_id.contains("..") {
            return Err(ClientError::InvalidFilename(format!("{photo_id}_{name}")));
        }
        Ok(self.target_dir.join(format!("{photo_id}_{name}")))
    }
}

#[async_trait]
impl PhotoDownloader for HttpPhotoDownloader {
    async fn download(&self, photo: &PhotoResponse) -> ClientResult<PathBuf> {
        let destination = self.destination(&photo.id, &photo.filename)?;
        let bytes = self.client.photo_bytes(&photo.url).await?;

        tokio::fs::create_dir_all(&self.target_dir).await?;
        tokio::fs::write(&destination, &bytes).await?;

        debug!(
            photo_id = %photo.id,
            path = %destination.display(),
            bytes = bytes.len(),
            "Photo saved"
        );
        Ok(destination)
    }
}
