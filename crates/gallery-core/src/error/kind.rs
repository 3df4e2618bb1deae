//! Failure classes shared by every layer's error type

/// How a failure looks to the caller. Each layer sorts its own errors into
/// one of these and the HTTP status follows from the class alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input
    BadRequest,
    /// No usable credentials
    Unauthenticated,
    /// Credentials are fine but the action is not allowed
    Forbidden,
    NotFound,
    Internal,
}

impl ErrorKind {
    pub const fn http_status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }

    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal)
    }
}
