//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in gallery-core.

mod audit_log;
mod error;
mod feedback;
mod photo;
mod settings;

pub use audit_log::PgAuditLogRepository;
pub use feedback::PgFeedbackRepository;
pub use photo::PgPhotoRepository;
pub use settings::PgSettingsRepository;
