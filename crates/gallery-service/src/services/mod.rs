//! Business logic services
//!
//! Services borrow the [`ServiceContext`] for the duration of one call and
//! hold no state of their own.

pub mod aggregator;
pub mod context;
pub mod error;
pub mod feedback;
pub mod guest_session;
pub mod moderation;
pub mod photo;
pub mod settings;

pub use aggregator::AggregatorService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use feedback::{FeedbackService, Viewer};
pub use guest_session::GuestSessionService;
pub use moderation::ModerationService;
pub use photo::PhotoService;
pub use settings::SettingsService;
