//! Entity <-> model mappers
//!
//! - `From`/`TryFrom<Model> for Entity`: database rows to domain objects
//! - `*Insert` structs: entity values prepared for binding

mod audit_log;
mod feedback;
mod photo;
mod settings;

pub use audit_log::AuditLogInsert;
pub use feedback::FeedbackInsert;

pub(crate) use feedback::into_feedback;
