//! # gallery-db
//!
//! PostgreSQL implementations of the gallery-core repository traits via SQLx.
//!
//! - Connection pool management and migrations
//! - Row models with SQLx `FromRow` derives
//! - Entity <-> model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gallery_db::{create_pool, run_migrations, PgPhotoRepository, PoolConfig};
//! use gallery_core::traits::PhotoRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/gallery")).await?;
//!     run_migrations(&pool, "./crates/gallery-db/migrations").await?;
//!     let photos = PgPhotoRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgAuditLogRepository, PgFeedbackRepository, PgPhotoRepository, PgSettingsRepository,
};
