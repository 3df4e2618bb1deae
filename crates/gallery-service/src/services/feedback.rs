//! Feedback service
//!
//! Guest submissions (toggle for likes/favorites, upsert for ratings/comments),
//! feedback reads with guest visibility rules, the event summary and export.

use std::collections::HashMap;

use gallery_core::entities::{ClientInfo, EventFeedbackSummary, Feedback, FeedbackContent};
use gallery_core::traits::{FeedbackQuery, ToggleOutcome};
use gallery_core::{DomainError, GuestIdentifier, Photo, Snowflake};
use tracing::{error, info, instrument};
use validator::Validate;

use crate::dto::{
    EventSummaryResponse, FeedbackExportRow, FeedbackResponse, FeedbackSubmissionResponse,
    PhotoFeedbackQuery, SubmissionAction, SubmitFeedbackRequest,
};

use super::aggregator::AggregatorService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::settings::SettingsService;

/// Who is reading feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Admin(Snowflake),
    Guest(GuestIdentifier),
    Anonymous,
}

impl Viewer {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }

    fn guest(&self) -> Option<&GuestIdentifier> {
        match self {
            Self::Guest(guest) => Some(guest),
            _ => None,
        }
    }
}

pub struct FeedbackService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedbackService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit guest feedback on a photo.
    ///
    /// Validation and settings checks run before any write. Every successful
    /// write recomputes the photo's counters before returning.
    #[instrument(skip(self, guest, request, client), fields(guest = %guest.redacted(), feedback_type = %request.feedback_type))]
    pub async fn submit_feedback(
        &self,
        event_id: Snowflake,
        photo_id: Snowflake,
        guest: &GuestIdentifier,
        request: SubmitFeedbackRequest,
        client: ClientInfo,
    ) -> ServiceResult<FeedbackSubmissionResponse> {
        request.validate()?;
        let content = FeedbackContent::parse(
            &request.feedback_type,
            request.rating,
            request.comment_text.as_deref(),
            self.ctx.feedback_config().max_comment_length,
        )?;
        let feedback_type = content.feedback_type();

        let settings = SettingsService::new(self.ctx).load(event_id).await?;
        settings.ensure_allows(feedback_type)?;
        self.find_event_photo(event_id, photo_id).await?;

        let candidate = Feedback::new(
            self.ctx.generate_id(),
            event_id,
            photo_id,
            guest.clone(),
            content,
            settings.initial_approval(feedback_type),
        )
        .with_guest_details(
            non_blank(request.guest_name),
            non_blank(request.guest_email),
        )
        .with_client_info(client);

        let log_failure = |e: DomainError| {
            error!(
                event_id = %event_id,
                photo_id = %photo_id,
                feedback_type = %feedback_type,
                guest = %guest.redacted(),
                error = %e,
                "Failed to store feedback"
            );
            e
        };

        let (action, stored) = if feedback_type.is_toggle() {
            match self
                .ctx
                .feedback_repo()
                .toggle(&candidate)
                .await
                .map_err(log_failure)?
            {
                ToggleOutcome::Added(feedback) => (SubmissionAction::Added, Some(feedback)),
                ToggleOutcome::Removed => (SubmissionAction::Removed, None),
            }
        } else {
            let approve_on_update = self
                .ctx
                .feedback_config()
                .comment_edit_approval
                .approve_on_update(feedback_type, &settings);
            let outcome = self
                .ctx
                .feedback_repo()
                .upsert(&candidate, approve_on_update)
                .await
                .map_err(log_failure)?;
            let action = if outcome.created {
                SubmissionAction::Added
            } else {
                SubmissionAction::Updated
            };
            (action, Some(outcome.feedback))
        };

        let stats = AggregatorService::new(self.ctx).recompute(photo_id).await?;

        info!(
            event_id = %event_id,
            photo_id = %photo_id,
            feedback_type = %feedback_type,
            ?action,
            "Feedback submitted"
        );

        Ok(FeedbackSubmissionResponse {
            action,
            feedback_type,
            feedback: stored.as_ref().map(FeedbackResponse::for_guest),
            stats,
        })
    }

    /// Feedback rows of a photo, newest first.
    ///
    /// Non-admin viewers only see approved, visible rows; when the event
    /// hides feedback from guests they only see their own, and guest names
    /// are stripped when the event hides them.
    #[instrument(skip(self, params))]
    pub async fn get_photo_feedback(
        &self,
        photo_id: Snowflake,
        viewer: &Viewer,
        params: &PhotoFeedbackQuery,
    ) -> ServiceResult<Vec<FeedbackResponse>> {
        let photo = self
            .ctx
            .photo_repo()
            .find_by_id(photo_id)
            .await?
            .ok_or(DomainError::PhotoNotFound(photo_id))?;

        let mut query = FeedbackQuery {
            feedback_type: params.feedback_type()?,
            approved_only: params.approved_only.unwrap_or(false),
            include_hidden: params.include_hidden.unwrap_or(false),
            guest_identifier: None,
        };

        if viewer.is_admin() {
            query.guest_identifier = params
                .guest_identifier
                .as_deref()
                .map(GuestIdentifier::new)
                .transpose()?;
            let rows = self.ctx.feedback_repo().find_by_photo(photo_id, &query).await?;
            return Ok(rows.iter().map(FeedbackResponse::from).collect());
        }

        let settings = SettingsService::new(self.ctx).load(photo.event_id).await?;
        query.approved_only = true;
        query.include_hidden = false;

        let own_only = params.mine.unwrap_or(false) || !settings.show_feedback_to_guests;
        if own_only {
            match viewer.guest() {
                Some(guest) => query.guest_identifier = Some(guest.clone()),
                None => return Ok(Vec::new()),
            }
        }

        let mut rows = self.ctx.feedback_repo().find_by_photo(photo_id, &query).await?;
        if !settings.show_guest_names {
            rows.iter_mut().for_each(Feedback::strip_guest_details);
        }

        Ok(rows.iter().map(FeedbackResponse::for_guest).collect())
    }

    /// Event totals over visible rows
    #[instrument(skip(self))]
    pub async fn get_event_summary(&self, event_id: Snowflake) -> ServiceResult<EventSummaryResponse> {
        let rows = self.ctx.feedback_repo().find_by_event(event_id).await?;

        Ok(EventSummaryResponse {
            event_id: event_id.to_string(),
            summary: EventFeedbackSummary::from_feedback(&rows),
        })
    }

    /// Every row of the event, hidden ones included, oldest first, joined
    /// with the photo filename
    #[instrument(skip(self))]
    pub async fn export_event_feedback(
        &self,
        event_id: Snowflake,
    ) -> ServiceResult<Vec<FeedbackExportRow>> {
        let rows = self.ctx.feedback_repo().find_by_event(event_id).await?;
        let filenames: HashMap<Snowflake, String> = self
            .ctx
            .photo_repo()
            .find_by_event(event_id, None)
            .await?
            .into_iter()
            .map(|photo| (photo.id, photo.filename))
            .collect();

        info!(event_id = %event_id, rows = rows.len(), "Feedback exported");

        Ok(rows
            .iter()
            .map(|row| FeedbackExportRow::new(row, filenames.get(&row.photo_id).cloned()))
            .collect())
    }

    /// The photo, provided it belongs to `event_id`
    async fn find_event_photo(&self, event_id: Snowflake, photo_id: Snowflake) -> ServiceResult<Photo> {
        self.ctx
            .photo_repo()
            .find_by_id(photo_id)
            .await?
            .filter(|photo| photo.belongs_to(event_id))
            .ok_or_else(|| ServiceError::from(DomainError::PhotoNotFound(photo_id)))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
