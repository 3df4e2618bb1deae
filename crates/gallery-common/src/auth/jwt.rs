//! Guest and admin bearer tokens
//!
//! Guest tokens carry a random guest identifier and the event they were
//! issued for. Admin tokens are minted by the organizer auth system with the
//! same secret; [`JwtService::issue_admin_token`] exists for tooling and tests.

use chrono::{Duration, Utc};
use gallery_core::{GuestIdentifier, Snowflake};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Guest,
    Admin,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Guest identifier for guest tokens, admin snowflake for admin tokens
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: TokenType,
    /// Event a guest token is scoped to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl Claims {
    /// # Errors
    /// Returns `InvalidToken` if the subject is not a usable guest identifier
    pub fn guest_identifier(&self) -> Result<GuestIdentifier, AppError> {
        GuestIdentifier::new(self.sub.as_str()).map_err(|_| AppError::InvalidToken)
    }

    /// # Errors
    /// Returns `InvalidToken` if the subject is not a snowflake
    pub fn admin_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    /// # Errors
    /// Returns `InvalidToken` if the token carries no parseable event scope
    pub fn event_id(&self) -> Result<Snowflake, AppError> {
        self.event_id
            .as_deref()
            .and_then(|raw| Snowflake::parse(raw).ok())
            .ok_or(AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Encoded token handed to a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Encodes and validates gallery tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    guest_token_expiry: i64,
    admin_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, guest_token_expiry: i64, admin_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            guest_token_expiry,
            admin_token_expiry,
        }
    }

    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_guest_token(
        &self,
        guest: &GuestIdentifier,
        event_id: Snowflake,
    ) -> Result<IssuedToken, AppError> {
        self.issue(
            guest.as_str().to_string(),
            TokenType::Guest,
            Some(event_id.to_string()),
            self.guest_token_expiry,
        )
    }

    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_admin_token(&self, admin_id: Snowflake) -> Result<IssuedToken, AppError> {
        self.issue(admin_id.to_string(), TokenType::Admin, None, self.admin_token_expiry)
    }

    fn issue(
        &self,
        sub: String,
        token_type: TokenType,
        event_id: Option<String>,
        expiry: i64,
    ) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            token_type,
            event_id,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to encode JWT: {e}")))?;

        Ok(IssuedToken {
            token,
            token_type: "Bearer".to_string(),
            expires_in: expiry,
        })
    }

    /// Decode and verify signature and expiry
    ///
    /// # Errors
    /// Returns `TokenExpired` or `InvalidToken`
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    /// # Errors
    /// Returns an error unless the token is a valid guest token with an event scope
    pub fn validate_guest_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != TokenType::Guest {
            return Err(AppError::InvalidToken);
        }
        claims.guest_identifier()?;
        claims.event_id()?;
        Ok(claims)
    }

    /// # Errors
    /// Returns an error unless the token is a valid admin token
    pub fn validate_admin_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != TokenType::Admin {
            return Err(AppError::InsufficientPermissions);
        }
        claims.admin_id()?;
        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("guest_token_expiry", &self.guest_token_expiry)
            .field("admin_token_expiry", &self.admin_token_expiry)
            .finish_non_exhaustive()
    }
}
