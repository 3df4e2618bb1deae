//! Errors surfaced by the feedback services

use gallery_common::AppError;
use gallery_core::{DomainError, ErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Rejected by a domain rule, or a repository failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Token or wiring failure from the shared layer
    #[error(transparent)]
    App(#[from] AppError),

    /// Request or builder input that failed validation
    #[error("Validation error: {0}")]
    Invalid(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => e.kind(),
            Self::App(e) => e.kind(),
            Self::Invalid(_) => ErrorKind::BadRequest,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().http_status()
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Invalid(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => Self::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Invalid(msg) => Self::Validation(msg),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
