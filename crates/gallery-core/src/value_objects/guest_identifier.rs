//! Guest identifier - opaque per-visitor identity issued with a guest session

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Identifies one gallery visitor without an account.
///
/// The value is the uniqueness key for feedback rows, so it must never be
/// written to logs in full. Use [`GuestIdentifier::redacted`] there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GuestIdentifier(String);

impl GuestIdentifier {
    pub const MAX_LEN: usize = 255;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError(
                "guest identifier must not be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(DomainError::ValidationError(format!(
                "guest identifier exceeds {} characters",
                Self::MAX_LEN
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First four characters followed by `***`
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(4).collect();
        format!("{prefix}***")
    }
}

impl fmt::Display for GuestIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GuestIdentifier {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GuestIdentifier> for String {
    fn from(id: GuestIdentifier) -> Self {
        id.0
    }
}
