//! Repository traits (ports) - the data access the domain needs
//!
//! The infrastructure layer (gallery-db) provides PostgreSQL
//! implementations; service tests run against in-memory ones.

use async_trait::async_trait;

use crate::entities::{
    AuditEntry, Feedback, FeedbackSettings, FeedbackSettingsPatch, FeedbackType, Photo, PhotoStats,
};
use crate::error::DomainError;
use crate::value_objects::{GuestIdentifier, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Photo Repository
// ============================================================================

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Photo>>;

    /// Photos of an event ordered by id, optionally limited to one category
    async fn find_by_event(
        &self,
        event_id: Snowflake,
        category: Option<&str>,
    ) -> RepoResult<Vec<Photo>>;

    /// Every photo id in the event, ordered by id
    async fn find_ids_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Snowflake>>;

    /// Overwrite all denormalized counters in one write
    async fn update_stats(&self, photo_id: Snowflake, stats: &PhotoStats) -> RepoResult<()>;
}

// ============================================================================
// Feedback Repository
// ============================================================================

/// Outcome of a like/favorite toggle
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    Added(Feedback),
    Removed,
}

/// Outcome of a rating/comment upsert
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertOutcome {
    pub feedback: Feedback,
    pub created: bool,
}

/// Filters for listing a photo's feedback
#[derive(Debug, Clone, Default)]
pub struct FeedbackQuery {
    pub feedback_type: Option<FeedbackType>,
    pub approved_only: bool,
    pub include_hidden: bool,
    pub guest_identifier: Option<GuestIdentifier>,
}

impl FeedbackQuery {
    pub fn matches(&self, feedback: &Feedback) -> bool {
        self.feedback_type.map_or(true, |t| feedback.feedback_type == t)
            && (!self.approved_only || feedback.is_approved)
            && (self.include_hidden || !feedback.is_hidden)
            && self
                .guest_identifier
                .as_ref()
                .map_or(true, |g| feedback.is_from(g))
    }
}

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Feedback>>;

    /// Remove the guest's row for this (event, photo, type) if it exists,
    /// otherwise insert `candidate`. Must be atomic with respect to
    /// concurrent toggles of the same key.
    async fn toggle(&self, candidate: &Feedback) -> RepoResult<ToggleOutcome>;

    /// Insert `candidate`, or replace the rating/comment of the existing row
    /// for the same key. On update the approval flag becomes
    /// `approve_on_update` and the hidden flag is kept.
    async fn upsert(&self, candidate: &Feedback, approve_on_update: bool)
        -> RepoResult<UpsertOutcome>;

    /// Set moderation flags, returning the updated row
    async fn update_moderation(
        &self,
        id: Snowflake,
        is_approved: bool,
        is_hidden: bool,
    ) -> RepoResult<Option<Feedback>>;

    /// Permanently delete a row, returning it
    async fn delete(&self, id: Snowflake) -> RepoResult<Option<Feedback>>;

    /// Non-hidden rows of a photo (aggregator input)
    async fn find_visible_by_photo(&self, photo_id: Snowflake) -> RepoResult<Vec<Feedback>>;

    /// Rows of a photo matching `query`, newest first
    async fn find_by_photo(
        &self,
        photo_id: Snowflake,
        query: &FeedbackQuery,
    ) -> RepoResult<Vec<Feedback>>;

    /// Comments awaiting moderation, oldest first
    async fn find_pending(&self, event_id: Option<Snowflake>) -> RepoResult<Vec<Feedback>>;

    /// Every row of an event including hidden ones, oldest first
    async fn find_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Feedback>>;

    /// Ids of photos the guest left visible feedback of `feedback_type` on
    async fn photo_ids_for_guest(
        &self,
        event_id: Snowflake,
        guest: &GuestIdentifier,
        feedback_type: FeedbackType,
    ) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Settings Repository
// ============================================================================

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn find(&self, event_id: Snowflake) -> RepoResult<Option<FeedbackSettings>>;

    /// Write only the fields set in `patch`, creating the row from defaults
    /// if the event has none. Concurrent patches on different fields must
    /// all survive.
    async fn apply_patch(
        &self,
        event_id: Snowflake,
        patch: &FeedbackSettingsPatch,
    ) -> RepoResult<FeedbackSettings>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn create(&self, entry: &AuditEntry) -> RepoResult<()>;

    /// Most recent entries first
    async fn find_by_event(&self, event_id: Snowflake, limit: i64) -> RepoResult<Vec<AuditEntry>>;
}
