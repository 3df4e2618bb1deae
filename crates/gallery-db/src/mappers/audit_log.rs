//! Audit entry <-> model mapper

use gallery_core::entities::AuditEntry;
use gallery_core::error::DomainError;
use gallery_core::value_objects::Snowflake;

use crate::models::AuditLogModel;

impl TryFrom<AuditLogModel> for AuditEntry {
    type Error = DomainError;

    fn try_from(model: AuditLogModel) -> Result<Self, Self::Error> {
        Ok(AuditEntry {
            id: Snowflake::new(model.id),
            event_id: Snowflake::new(model.event_id),
            actor_id: Snowflake::new(model.actor_id),
            action: model.action.parse()?,
            target_id: Snowflake::new(model.target_id),
            target_type: model.target_type,
            details: model.details,
            created_at: model.created_at,
        })
    }
}

pub struct AuditLogInsert<'a> {
    pub id: i64,
    pub event_id: i64,
    pub actor_id: i64,
    pub action: &'static str,
    pub target_id: i64,
    pub target_type: &'a str,
    pub details: &'a serde_json::Value,
}

impl<'a> AuditLogInsert<'a> {
    pub fn new(entry: &'a AuditEntry) -> Self {
        Self {
            id: entry.id.into_inner(),
            event_id: entry.event_id.into_inner(),
            actor_id: entry.actor_id.into_inner(),
            action: entry.action.as_str(),
            target_id: entry.target_id.into_inner(),
            target_type: &entry.target_type,
            details: &entry.details,
        }
    }
}
