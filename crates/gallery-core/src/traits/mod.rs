//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AuditLogRepository, FeedbackQuery, FeedbackRepository, PhotoRepository, RepoResult,
    SettingsRepository, ToggleOutcome, UpsertOutcome,
};
