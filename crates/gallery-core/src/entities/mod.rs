//! Domain entities - core business objects

mod audit;
mod feedback;
mod filter;
mod photo;
mod settings;
mod stats;

pub use audit::{AuditAction, AuditEntry};
pub use feedback::{ClientInfo, Feedback, FeedbackContent, FeedbackType, ModerationAction};
pub use filter::{FilterOperator, PhotoFilter};
pub use photo::{Photo, PhotoType};
pub use settings::{CommentEditApproval, FeedbackSettings, FeedbackSettingsPatch};
pub use stats::{EventFeedbackSummary, PhotoStats};
