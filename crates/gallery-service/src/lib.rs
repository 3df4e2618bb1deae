//! # gallery-service
//!
//! Application layer: feedback submission and aggregation, moderation,
//! per-event settings, guest sessions and photo lookups, plus the DTOs the
//! HTTP layer serializes.

pub mod dto;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use services::{
    AggregatorService, FeedbackService, GuestSessionService, ModerationService, PhotoService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SettingsService, Viewer,
};
