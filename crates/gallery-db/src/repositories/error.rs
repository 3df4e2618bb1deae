//! Error handling utilities for repositories

use gallery_core::error::DomainError;
use gallery_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Foreign key violations on photo_id mean the photo is gone
pub fn map_photo_fk_violation(e: SqlxError, photo_id: Snowflake) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return DomainError::PhotoNotFound(photo_id);
        }
    }
    map_db_error(e)
}
