//! Authentication extractors
//!
//! Guest and admin bearer tokens from the Authorization header. Guest tokens
//! are scoped to one event; when the route carries an `event_id` path
//! parameter it must match the token's event.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Path},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use gallery_common::{Claims, TokenType};
use gallery_core::{GuestIdentifier, Snowflake};
use gallery_service::Viewer;

use crate::response::ApiError;
use crate::state::AppState;

async fn bearer_token<S: Send + Sync>(parts: &mut Parts, state: &S) -> Option<String> {
    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
}

/// `event_id` from the matched route, if the route has one
async fn path_event_id<S: Send + Sync>(
    parts: &mut Parts,
    state: &S,
) -> Result<Option<Snowflake>, ApiError> {
    let Ok(Path(params)) = Path::<HashMap<String, String>>::from_request_parts(parts, state).await
    else {
        return Ok(None);
    };
    params
        .get("event_id")
        .map(|raw| {
            raw.parse::<Snowflake>()
                .map_err(|_| ApiError::invalid_path("Invalid event_id format"))
        })
        .transpose()
}

/// Authenticated guest, scoped to the event in their token
#[derive(Debug, Clone)]
pub struct GuestSession {
    pub guest: GuestIdentifier,
    pub event_id: Snowflake,
}

impl GuestSession {
    fn from_claims(claims: &Claims) -> Result<Self, ApiError> {
        Ok(Self {
            guest: claims.guest_identifier()?,
            event_id: claims.event_id()?,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for GuestSession
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await.ok_or(ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let claims = app_state
            .jwt_service()
            .validate_guest_token(&token)
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected guest token");
                ApiError::from(e)
            })?;
        let session = Self::from_claims(&claims)?;

        if let Some(event_id) = path_event_id(parts, state).await? {
            if event_id != session.event_id {
                tracing::warn!(
                    token_event = %session.event_id,
                    path_event = %event_id,
                    guest = %session.guest.redacted(),
                    "Guest token used outside its event"
                );
                return Err(ApiError::EventMismatch);
            }
        }

        Ok(session)
    }
}

/// Guest session if a still-valid token for this event is presented.
///
/// Anything else (no header, expired or foreign token, another event) yields
/// `None`, so the caller can start a fresh session.
#[derive(Debug, Clone)]
pub struct OptionalGuestSession(pub Option<GuestSession>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalGuestSession
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match GuestSession::from_request_parts(parts, state).await {
            Ok(session) => Ok(Self(Some(session))),
            Err(ApiError::InvalidPath(msg)) => Err(ApiError::InvalidPath(msg)),
            Err(_) => Ok(Self(None)),
        }
    }
}

/// Authenticated organizer
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub admin_id: Snowflake,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await.ok_or(ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let claims = app_state
            .jwt_service()
            .validate_admin_token(&token)
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected admin token");
                ApiError::from(e)
            })?;

        Ok(Self {
            admin_id: claims.admin_id()?,
        })
    }
}

/// Whoever is calling: admin, guest or nobody.
///
/// A missing header is anonymous; a present but invalid token is rejected.
#[derive(Debug, Clone)]
pub struct RequestViewer(pub Viewer);

#[async_trait]
impl<S> FromRequestParts<S> for RequestViewer
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts, state).await else {
            return Ok(Self(Viewer::Anonymous));
        };

        let app_state = AppState::from_ref(state);
        let claims = app_state.jwt_service().decode_token(&token)?;
        let viewer = match claims.token_type {
            TokenType::Admin => Viewer::Admin(claims.admin_id()?),
            TokenType::Guest => Viewer::Guest(claims.guest_identifier()?),
        };

        Ok(Self(viewer))
    }
}
