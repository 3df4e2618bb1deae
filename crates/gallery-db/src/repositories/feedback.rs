//! PostgreSQL implementation of FeedbackRepository
//!
//! Uniqueness of (event, photo, guest, type) is enforced by the
//! `uq_photo_feedback_guest_type` constraint; toggles and upserts lean on it
//! instead of a separate existence check.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use gallery_core::entities::{Feedback, FeedbackType};
use gallery_core::error::DomainError;
use gallery_core::traits::{
    FeedbackQuery, FeedbackRepository, RepoResult, ToggleOutcome, UpsertOutcome,
};
use gallery_core::value_objects::{GuestIdentifier, Snowflake};

use crate::mappers::{into_feedback, FeedbackInsert};
use crate::models::{FeedbackModel, UpsertedFeedbackModel};

use super::error::{map_db_error, map_photo_fk_violation};

macro_rules! feedback_columns {
    () => {
        "id, event_id, photo_id, guest_identifier, feedback_type, rating, comment_text, \
         guest_name, guest_email, ip_address, user_agent, is_approved, is_hidden, \
         created_at, updated_at"
    };
}

const TOGGLE_INSERT_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Feedback>> {
        let result = sqlx::query_as::<_, FeedbackModel>(concat!(
            "SELECT ",
            feedback_columns!(),
            " FROM photo_feedback WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Feedback::try_from).transpose()
    }

    #[instrument(
        skip(self, candidate),
        fields(photo_id = %candidate.photo_id, feedback_type = %candidate.feedback_type)
    )]
    async fn toggle(&self, candidate: &Feedback) -> RepoResult<ToggleOutcome> {
        let row = FeedbackInsert::new(candidate);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query_scalar::<_, i64>(
            r#"
            DELETE FROM photo_feedback
            WHERE event_id = $1 AND photo_id = $2 AND guest_identifier = $3 AND feedback_type = $4
            RETURNING id
            "#,
        )
        .bind(row.event_id)
        .bind(row.photo_id)
        .bind(row.guest_identifier)
        .bind(row.feedback_type)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if let Some(removed_id) = removed {
            tx.commit().await.map_err(map_db_error)?;
            debug!(feedback_id = removed_id, "Toggle removed existing feedback");
            return Ok(ToggleOutcome::Removed);
        }

        // A concurrent toggle may insert the same key first, and yet another may
        // delete it again before we re-read it
        for _ in 0..TOGGLE_INSERT_ATTEMPTS {
            let inserted = sqlx::query_as::<_, FeedbackModel>(concat!(
                "INSERT INTO photo_feedback (id, event_id, photo_id, guest_identifier, feedback_type, \
                 guest_name, guest_email, ip_address, user_agent, is_approved, is_hidden, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, FALSE, NOW(), NOW()) \
                 ON CONFLICT ON CONSTRAINT uq_photo_feedback_guest_type DO NOTHING \
                 RETURNING ",
                feedback_columns!()
            ))
            .bind(row.id)
            .bind(row.event_id)
            .bind(row.photo_id)
            .bind(row.guest_identifier)
            .bind(row.feedback_type)
            .bind(row.guest_name)
            .bind(row.guest_email)
            .bind(row.ip_address)
            .bind(row.user_agent)
            .bind(row.is_approved)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_photo_fk_violation(e, candidate.photo_id))?;

            let model = match inserted {
                Some(model) => Some(model),
                None => sqlx::query_as::<_, FeedbackModel>(concat!(
                    "SELECT ",
                    feedback_columns!(),
                    " FROM photo_feedback \
                     WHERE event_id = $1 AND photo_id = $2 AND guest_identifier = $3 AND feedback_type = $4"
                ))
                .bind(row.event_id)
                .bind(row.photo_id)
                .bind(row.guest_identifier)
                .bind(row.feedback_type)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?,
            };

            if let Some(model) = model {
                tx.commit().await.map_err(map_db_error)?;
                return Ok(ToggleOutcome::Added(Feedback::try_from(model)?));
            }
            debug!("Toggle lost an insert race, retrying");
        }

        Err(DomainError::DatabaseError(format!(
            "toggle for photo {} did not settle after {TOGGLE_INSERT_ATTEMPTS} attempts",
            candidate.photo_id
        )))
    }

    #[instrument(
        skip(self, candidate),
        fields(photo_id = %candidate.photo_id, feedback_type = %candidate.feedback_type)
    )]
    async fn upsert(
        &self,
        candidate: &Feedback,
        approve_on_update: bool,
    ) -> RepoResult<UpsertOutcome> {
        let row = FeedbackInsert::new(candidate);

        let result = sqlx::query_as::<_, UpsertedFeedbackModel>(concat!(
            "INSERT INTO photo_feedback (id, event_id, photo_id, guest_identifier, feedback_type, \
             rating, comment_text, guest_name, guest_email, ip_address, user_agent, \
             is_approved, is_hidden, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, FALSE, NOW(), NOW()) \
             ON CONFLICT ON CONSTRAINT uq_photo_feedback_guest_type DO UPDATE SET \
                 rating = EXCLUDED.rating, \
                 comment_text = EXCLUDED.comment_text, \
                 guest_name = COALESCE(EXCLUDED.guest_name, photo_feedback.guest_name), \
                 guest_email = COALESCE(EXCLUDED.guest_email, photo_feedback.guest_email), \
                 ip_address = EXCLUDED.ip_address, \
                 user_agent = EXCLUDED.user_agent, \
                 is_approved = $13, \
                 updated_at = NOW() \
             RETURNING ",
            feedback_columns!(),
            ", (xmax = 0) AS inserted"
        ))
        .bind(row.id)
        .bind(row.event_id)
        .bind(row.photo_id)
        .bind(row.guest_identifier)
        .bind(row.feedback_type)
        .bind(row.rating)
        .bind(row.comment_text)
        .bind(row.guest_name)
        .bind(row.guest_email)
        .bind(row.ip_address)
        .bind(row.user_agent)
        .bind(row.is_approved)
        .bind(approve_on_update)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_photo_fk_violation(e, candidate.photo_id))?;

        Ok(UpsertOutcome {
            created: result.inserted,
            feedback: Feedback::try_from(result.feedback)?,
        })
    }

    #[instrument(skip(self))]
    async fn update_moderation(
        &self,
        id: Snowflake,
        is_approved: bool,
        is_hidden: bool,
    ) -> RepoResult<Option<Feedback>> {
        let result = sqlx::query_as::<_, FeedbackModel>(concat!(
            "UPDATE photo_feedback SET is_approved = $2, is_hidden = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING ",
            feedback_columns!()
        ))
        .bind(id.into_inner())
        .bind(is_approved)
        .bind(is_hidden)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Feedback::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<Option<Feedback>> {
        let result = sqlx::query_as::<_, FeedbackModel>(concat!(
            "DELETE FROM photo_feedback WHERE id = $1 RETURNING ",
            feedback_columns!()
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Feedback::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_visible_by_photo(&self, photo_id: Snowflake) -> RepoResult<Vec<Feedback>> {
        let results = sqlx::query_as::<_, FeedbackModel>(concat!(
            "SELECT ",
            feedback_columns!(),
            " FROM photo_feedback WHERE photo_id = $1 AND is_hidden = FALSE"
        ))
        .bind(photo_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_feedback(results)
    }

    #[instrument(skip(self, query), fields(feedback_type = ?query.feedback_type))]
    async fn find_by_photo(
        &self,
        photo_id: Snowflake,
        query: &FeedbackQuery,
    ) -> RepoResult<Vec<Feedback>> {
        let results = sqlx::query_as::<_, FeedbackModel>(concat!(
            "SELECT ",
            feedback_columns!(),
            " FROM photo_feedback \
             WHERE photo_id = $1 \
               AND ($2::TEXT IS NULL OR feedback_type = $2) \
               AND (NOT $3 OR is_approved) \
               AND ($4 OR NOT is_hidden) \
               AND ($5::TEXT IS NULL OR guest_identifier = $5) \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(photo_id.into_inner())
        .bind(query.feedback_type.map(FeedbackType::as_str))
        .bind(query.approved_only)
        .bind(query.include_hidden)
        .bind(query.guest_identifier.as_ref().map(GuestIdentifier::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_feedback(results)
    }

    #[instrument(skip(self))]
    async fn find_pending(&self, event_id: Option<Snowflake>) -> RepoResult<Vec<Feedback>> {
        let results = sqlx::query_as::<_, FeedbackModel>(concat!(
            "SELECT ",
            feedback_columns!(),
            " FROM photo_feedback \
             WHERE feedback_type = 'comment' AND is_approved = FALSE AND is_hidden = FALSE \
               AND ($1::BIGINT IS NULL OR event_id = $1) \
             ORDER BY created_at, id"
        ))
        .bind(event_id.map(Snowflake::into_inner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_feedback(results)
    }

    #[instrument(skip(self))]
    async fn find_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Feedback>> {
        let results = sqlx::query_as::<_, FeedbackModel>(concat!(
            "SELECT ",
            feedback_columns!(),
            " FROM photo_feedback WHERE event_id = $1 ORDER BY created_at, id"
        ))
        .bind(event_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_feedback(results)
    }

    #[instrument(skip(self, guest), fields(guest = %guest.redacted()))]
    async fn photo_ids_for_guest(
        &self,
        event_id: Snowflake,
        guest: &GuestIdentifier,
        feedback_type: FeedbackType,
    ) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT photo_id
            FROM photo_feedback
            WHERE event_id = $1 AND guest_identifier = $2 AND feedback_type = $3
              AND is_hidden = FALSE
            ORDER BY photo_id
            "#,
        )
        .bind(event_id.into_inner())
        .bind(guest.as_str())
        .bind(feedback_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }
}
