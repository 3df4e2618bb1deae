//! Service context - dependency container for services
//!
//! Built once at startup and shared by every request handler.

use std::sync::Arc;

use gallery_common::auth::JwtService;
use gallery_common::FeedbackConfig;
use gallery_core::traits::{
    AuditLogRepository, FeedbackRepository, PhotoRepository, SettingsRepository,
};
use gallery_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Provides access to:
/// - Repositories for photos, feedback, settings and the audit log
/// - JWT service for guest sessions
/// - Snowflake generator for ID generation
/// - Feedback policy (comment length limit, edit approval)
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    photo_repo: Arc<dyn PhotoRepository>,
    feedback_repo: Arc<dyn FeedbackRepository>,
    settings_repo: Arc<dyn SettingsRepository>,
    audit_repo: Arc<dyn AuditLogRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    feedback_config: FeedbackConfig,
}

impl ServiceContext {
    pub fn new(
        photo_repo: Arc<dyn PhotoRepository>,
        feedback_repo: Arc<dyn FeedbackRepository>,
        settings_repo: Arc<dyn SettingsRepository>,
        audit_repo: Arc<dyn AuditLogRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        feedback_config: FeedbackConfig,
    ) -> Self {
        Self {
            photo_repo,
            feedback_repo,
            settings_repo,
            audit_repo,
            jwt_service,
            snowflake_generator,
            feedback_config,
        }
    }

    // === Repositories ===

    pub fn photo_repo(&self) -> &dyn PhotoRepository {
        self.photo_repo.as_ref()
    }

    pub fn feedback_repo(&self) -> &dyn FeedbackRepository {
        self.feedback_repo.as_ref()
    }

    pub fn settings_repo(&self) -> &dyn SettingsRepository {
        self.settings_repo.as_ref()
    }

    pub fn audit_repo(&self) -> &dyn AuditLogRepository {
        self.audit_repo.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn feedback_config(&self) -> &FeedbackConfig {
        &self.feedback_config
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .field("feedback_config", &self.feedback_config)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    photo_repo: Option<Arc<dyn PhotoRepository>>,
    feedback_repo: Option<Arc<dyn FeedbackRepository>>,
    settings_repo: Option<Arc<dyn SettingsRepository>>,
    audit_repo: Option<Arc<dyn AuditLogRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    feedback_config: Option<FeedbackConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photo_repo(mut self, repo: Arc<dyn PhotoRepository>) -> Self {
        self.photo_repo = Some(repo);
        self
    }

    pub fn feedback_repo(mut self, repo: Arc<dyn FeedbackRepository>) -> Self {
        self.feedback_repo = Some(repo);
        self
    }

    pub fn settings_repo(mut self, repo: Arc<dyn SettingsRepository>) -> Self {
        self.settings_repo = Some(repo);
        self
    }

    pub fn audit_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Defaults to [`FeedbackConfig::default`] when not set
    pub fn feedback_config(mut self, config: FeedbackConfig) -> Self {
        self.feedback_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Invalid` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.photo_repo
                .ok_or_else(|| ServiceError::validation("photo_repo is required"))?,
            self.feedback_repo
                .ok_or_else(|| ServiceError::validation("feedback_repo is required"))?,
            self.settings_repo
                .ok_or_else(|| ServiceError::validation("settings_repo is required"))?,
            self.audit_repo
                .ok_or_else(|| ServiceError::validation("audit_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            self.feedback_config.unwrap_or_default(),
        ))
    }
}
