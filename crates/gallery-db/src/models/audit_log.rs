//! Audit log database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Row of the feedback_audit_log table
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: i64,
    pub event_id: i64,
    pub actor_id: i64,
    pub action: String,
    pub target_id: i64,
    pub target_type: String,
    /// Feedback type and photo id of the target
    pub details: JsonValue,
    pub created_at: DateTime<Utc>,
}
