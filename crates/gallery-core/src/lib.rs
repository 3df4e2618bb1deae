//! # gallery-core
//!
//! Domain layer for the guest photo gallery: photos, guest feedback,
//! per-event feedback settings, moderation, and the repository ports the
//! infrastructure layer implements. No database or web framework types here.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

pub use entities::{
    AuditAction, AuditEntry, ClientInfo, CommentEditApproval, EventFeedbackSummary, Feedback,
    FeedbackContent, FeedbackSettings, FeedbackSettingsPatch, FeedbackType, FilterOperator,
    ModerationAction, Photo, PhotoFilter, PhotoStats, PhotoType,
};
pub use error::{DomainError, ErrorKind};
pub use traits::{
    AuditLogRepository, FeedbackQuery, FeedbackRepository, PhotoRepository, RepoResult,
    SettingsRepository, ToggleOutcome, UpsertOutcome,
};
pub use value_objects::{GuestIdentifier, Snowflake, SnowflakeGenerator, SnowflakeParseError};
