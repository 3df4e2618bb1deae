//! Moderation service
//!
//! Admin actions on feedback rows. Every action recomputes the owning
//! photo's counters and leaves an audit entry.

use gallery_core::entities::{AuditAction, AuditEntry, Feedback, ModerationAction};
use gallery_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{AuditEntryResponse, FeedbackResponse};

use super::aggregator::AggregatorService;
use super::context::ServiceContext;
use super::error::ServiceResult;

const DEFAULT_AUDIT_PAGE: i64 = 50;

pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply `approve`, `hide` or `reject` to a feedback row
    #[instrument(skip(self))]
    pub async fn moderate(
        &self,
        feedback_id: Snowflake,
        action: &str,
        admin_id: Snowflake,
    ) -> ServiceResult<bool> {
        let action: ModerationAction = action.parse()?;
        let feedback = self.find_feedback(feedback_id).await?;

        let (is_approved, is_hidden) = action.apply(feedback.is_approved);
        let updated = self
            .ctx
            .feedback_repo()
            .update_moderation(feedback_id, is_approved, is_hidden)
            .await?
            .ok_or(DomainError::FeedbackNotFound(feedback_id))?;

        AggregatorService::new(self.ctx)
            .recompute(updated.photo_id)
            .await?;
        self.record(admin_id, action.audit_action(), &updated).await?;

        info!(
            feedback_id = %feedback_id,
            admin_id = %admin_id,
            action = action.as_str(),
            "Feedback moderated"
        );

        Ok(true)
    }

    /// Permanently delete a feedback row
    #[instrument(skip(self))]
    pub async fn delete(&self, feedback_id: Snowflake, admin_id: Snowflake) -> ServiceResult<()> {
        let deleted = self
            .ctx
            .feedback_repo()
            .delete(feedback_id)
            .await?
            .ok_or(DomainError::FeedbackNotFound(feedback_id))?;

        AggregatorService::new(self.ctx)
            .recompute(deleted.photo_id)
            .await?;
        self.record(admin_id, AuditAction::FeedbackDeleted, &deleted)
            .await?;

        info!(
            feedback_id = %feedback_id,
            admin_id = %admin_id,
            feedback_type = %deleted.feedback_type,
            "Feedback deleted"
        );

        Ok(())
    }

    /// Comments awaiting approval, oldest first
    #[instrument(skip(self))]
    pub async fn pending(&self, event_id: Option<Snowflake>) -> ServiceResult<Vec<FeedbackResponse>> {
        let rows = self.ctx.feedback_repo().find_pending(event_id).await?;
        Ok(rows.iter().map(FeedbackResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn audit_log(
        &self,
        event_id: Snowflake,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<AuditEntryResponse>> {
        let entries = self
            .ctx
            .audit_repo()
            .find_by_event(event_id, limit.unwrap_or(DEFAULT_AUDIT_PAGE))
            .await?;
        Ok(entries.iter().map(AuditEntryResponse::from).collect())
    }

    async fn find_feedback(&self, feedback_id: Snowflake) -> ServiceResult<Feedback> {
        Ok(self
            .ctx
            .feedback_repo()
            .find_by_id(feedback_id)
            .await?
            .ok_or(DomainError::FeedbackNotFound(feedback_id))?)
    }

    async fn record(
        &self,
        admin_id: Snowflake,
        action: AuditAction,
        feedback: &Feedback,
    ) -> ServiceResult<()> {
        let entry = AuditEntry::for_feedback(self.ctx.generate_id(), admin_id, action, feedback);
        self.ctx.audit_repo().create(&entry).await?;
        Ok(())
    }
}
