//! Path parameter extractors
//!
//! Snowflake ids arrive as strings and are parsed with a 400 on failure.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use gallery_core::Snowflake;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::response::ApiError;

/// Extract path parameters, rejecting with an API error body
#[derive(Debug, Clone)]
pub struct SnowflakePath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for SnowflakePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(SnowflakePath(inner))
    }
}

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

#[derive(Debug, Deserialize)]
pub struct EventIdPath {
    pub event_id: String,
}

impl EventIdPath {
    pub fn event_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.event_id, "event_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct PhotoIdPath {
    pub photo_id: String,
}

impl PhotoIdPath {
    pub fn photo_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.photo_id, "photo_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct EventPhotoPath {
    pub event_id: String,
    pub photo_id: String,
}

impl EventPhotoPath {
    pub fn event_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.event_id, "event_id")
    }

    pub fn photo_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.photo_id, "photo_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedbackIdPath {
    pub feedback_id: String,
}

impl FeedbackIdPath {
    pub fn feedback_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.feedback_id, "feedback_id")
    }
}
