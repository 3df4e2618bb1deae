//! PostgreSQL implementation of PhotoRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gallery_core::entities::{Photo, PhotoStats};
use gallery_core::error::DomainError;
use gallery_core::traits::{PhotoRepository, RepoResult};
use gallery_core::value_objects::Snowflake;

use crate::models::PhotoModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Photo>> {
        let result = sqlx::query_as::<_, PhotoModel>(
            r#"
            SELECT id, event_id, filename, url, thumbnail_url, category, photo_type,
                   comment_count, like_count, favorite_count, average_rating, feedback_count,
                   created_at, updated_at
            FROM photos
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Photo::from))
    }

    #[instrument(skip(self))]
    async fn find_by_event(
        &self,
        event_id: Snowflake,
        category: Option<&str>,
    ) -> RepoResult<Vec<Photo>> {
        let results = sqlx::query_as::<_, PhotoModel>(
            r#"
            SELECT id, event_id, filename, url, thumbnail_url, category, photo_type,
                   comment_count, like_count, favorite_count, average_rating, feedback_count,
                   created_at, updated_at
            FROM photos
            WHERE event_id = $1
              AND ($2::TEXT IS NULL OR LOWER(category) = LOWER($2))
            ORDER BY id
            "#,
        )
        .bind(event_id.into_inner())
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Photo::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_ids_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM photos WHERE event_id = $1 ORDER BY id
            "#,
        )
        .bind(event_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn update_stats(&self, photo_id: Snowflake, stats: &PhotoStats) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE photos
            SET comment_count = $2,
                like_count = $3,
                favorite_count = $4,
                average_rating = $5,
                feedback_count = $6,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(photo_id.into_inner())
        .bind(stats.comment_count)
        .bind(stats.like_count)
        .bind(stats.favorite_count)
        .bind(stats.average_rating)
        .bind(stats.feedback_count)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PhotoNotFound(photo_id));
        }

        Ok(())
    }
}
