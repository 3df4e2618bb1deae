//! Axum extractors for request handling
//!
//! Bearer-token sessions, typed path parameters, query strings, validated
//! JSON bodies and client metadata.

mod auth;
mod client;
mod path;
mod query;
mod validated;

pub use auth::{AdminUser, GuestSession, OptionalGuestSession, RequestViewer};
pub use client::RequestClientInfo;
pub use path::{EventIdPath, EventPhotoPath, FeedbackIdPath, PhotoIdPath, SnowflakePath};
pub use query::QueryParams;
pub use validated::ValidatedJson;
