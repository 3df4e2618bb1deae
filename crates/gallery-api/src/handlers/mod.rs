//! Route handlers
//!
//! HTTP request handlers organized by resource.

pub mod feedback;
pub mod guest_sessions;
pub mod health;
pub mod moderation;
pub mod photos;
pub mod settings;
