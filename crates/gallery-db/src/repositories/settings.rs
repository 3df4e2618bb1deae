//! PostgreSQL implementation of SettingsRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gallery_core::entities::{FeedbackSettings, FeedbackSettingsPatch};
use gallery_core::traits::{RepoResult, SettingsRepository};
use gallery_core::value_objects::Snowflake;

use crate::models::FeedbackSettingsModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    #[instrument(skip(self))]
    async fn find(&self, event_id: Snowflake) -> RepoResult<Option<FeedbackSettings>> {
        let result = sqlx::query_as::<_, FeedbackSettingsModel>(
            r#"
            SELECT event_id, feedback_enabled, allow_likes, allow_ratings, allow_comments,
                   allow_favorites, moderate_comments, show_feedback_to_guests, show_guest_names,
                   created_at, updated_at
            FROM feedback_settings
            WHERE event_id = $1
            "#,
        )
        .bind(event_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(FeedbackSettings::from))
    }

    #[instrument(skip(self))]
    async fn apply_patch(
        &self,
        event_id: Snowflake,
        patch: &FeedbackSettingsPatch,
    ) -> RepoResult<FeedbackSettings> {
        let defaults = FeedbackSettings::defaults_for(event_id);

        // Columns merge against the row locked by the conflict check
        let result = sqlx::query_as::<_, FeedbackSettingsModel>(
            r#"
            INSERT INTO feedback_settings (
                event_id, feedback_enabled, allow_likes, allow_ratings, allow_comments,
                allow_favorites, moderate_comments, show_feedback_to_guests, show_guest_names,
                created_at, updated_at
            )
            VALUES (
                $1,
                COALESCE($2, $10), COALESCE($3, $11), COALESCE($4, $12), COALESCE($5, $13),
                COALESCE($6, $14), COALESCE($7, $15), COALESCE($8, $16), COALESCE($9, $17),
                NOW(), NOW()
            )
            ON CONFLICT (event_id) DO UPDATE SET
                feedback_enabled = COALESCE($2, feedback_settings.feedback_enabled),
                allow_likes = COALESCE($3, feedback_settings.allow_likes),
                allow_ratings = COALESCE($4, feedback_settings.allow_ratings),
                allow_comments = COALESCE($5, feedback_settings.allow_comments),
                allow_favorites = COALESCE($6, feedback_settings.allow_favorites),
                moderate_comments = COALESCE($7, feedback_settings.moderate_comments),
                show_feedback_to_guests = COALESCE($8, feedback_settings.show_feedback_to_guests),
                show_guest_names = COALESCE($9, feedback_settings.show_guest_names),
                updated_at = NOW()
            RETURNING event_id, feedback_enabled, allow_likes, allow_ratings, allow_comments,
                      allow_favorites, moderate_comments, show_feedback_to_guests,
                      show_guest_names, created_at, updated_at
            "#,
        )
        .bind(event_id.into_inner())
        .bind(patch.feedback_enabled)
        .bind(patch.allow_likes)
        .bind(patch.allow_ratings)
        .bind(patch.allow_comments)
        .bind(patch.allow_favorites)
        .bind(patch.moderate_comments)
        .bind(patch.show_feedback_to_guests)
        .bind(patch.show_guest_names)
        .bind(defaults.feedback_enabled)
        .bind(defaults.allow_likes)
        .bind(defaults.allow_ratings)
        .bind(defaults.allow_comments)
        .bind(defaults.allow_favorites)
        .bind(defaults.moderate_comments)
        .bind(defaults.show_feedback_to_guests)
        .bind(defaults.show_guest_names)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(FeedbackSettings::from(result))
    }
}
