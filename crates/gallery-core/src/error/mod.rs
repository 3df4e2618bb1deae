//! Domain error types

mod domain_error;
mod kind;

pub use domain_error::DomainError;
pub use kind::ErrorKind;
