//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers from domain entities to DTOs, and the CSV export writer

pub mod export;
pub mod mappers;
pub mod requests;
pub mod responses;

pub use export::{render_csv, ExportFormat};
pub use requests::{
    AuditLogQuery, ExportQuery, FilteredPhotosQuery, ModerateFeedbackRequest, PendingQuery,
    PhotoFeedbackQuery, PhotoListQuery, SubmitFeedbackRequest, UpdateFeedbackSettingsRequest,
};
pub use responses::{
    AuditEntryResponse, EventSummaryResponse, FeedbackExportRow, FeedbackResponse,
    FeedbackSettingsResponse, FeedbackSubmissionResponse, FilteredPhotosResponse,
    GuestSessionResponse, HealthChecks, HealthResponse, ModerationResponse, PhotoResponse,
    ReadinessResponse, SubmissionAction,
};
