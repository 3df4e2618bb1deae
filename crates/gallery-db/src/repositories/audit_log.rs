//! PostgreSQL implementation of AuditLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gallery_core::entities::AuditEntry;
use gallery_core::traits::{AuditLogRepository, RepoResult};
use gallery_core::value_objects::Snowflake;

use crate::mappers::AuditLogInsert;
use crate::models::AuditLogModel;

use super::error::map_db_error;

const MAX_PAGE: i64 = 500;

#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self, entry), fields(action = entry.action.as_str(), target_id = %entry.target_id))]
    async fn create(&self, entry: &AuditEntry) -> RepoResult<()> {
        let row = AuditLogInsert::new(entry);

        sqlx::query(
            r#"
            INSERT INTO feedback_audit_log (id, event_id, actor_id, action, target_id, target_type, details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(row.id)
        .bind(row.event_id)
        .bind(row.actor_id)
        .bind(row.action)
        .bind(row.target_id)
        .bind(row.target_type)
        .bind(row.details)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_event(&self, event_id: Snowflake, limit: i64) -> RepoResult<Vec<AuditEntry>> {
        let results = sqlx::query_as::<_, AuditLogModel>(
            r#"
            SELECT id, event_id, actor_id, action, target_id, target_type, details, created_at
            FROM feedback_audit_log
            WHERE event_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(event_id.into_inner())
        .bind(limit.clamp(1, MAX_PAGE))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(AuditEntry::try_from).collect()
    }
}
