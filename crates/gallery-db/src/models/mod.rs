//! Database models - SQLx row structs for the gallery tables

mod audit_log;
mod feedback;
mod photo;
mod settings;

pub use audit_log::AuditLogModel;
pub use feedback::{FeedbackModel, UpsertedFeedbackModel};
pub use photo::PhotoModel;
pub use settings::FeedbackSettingsModel;
