//! Guest sessions
//!
//! A guest is identified by a random identifier carried in an event-scoped
//! token, never by network address.

use gallery_core::{GuestIdentifier, Snowflake};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::dto::GuestSessionResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct GuestSessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GuestSessionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue a session token for `event_id`.
    ///
    /// `existing` is the identifier from a still-valid token for the same
    /// event; it is kept so the guest's earlier feedback stays theirs.
    #[instrument(skip(self, existing))]
    pub async fn start_session(
        &self,
        event_id: Snowflake,
        existing: Option<GuestIdentifier>,
    ) -> ServiceResult<GuestSessionResponse> {
        let resumed = existing.is_some();
        let guest = match existing {
            Some(guest) => guest,
            None => GuestIdentifier::new(Uuid::new_v4().to_string())?,
        };

        let issued = self.ctx.jwt_service().issue_guest_token(&guest, event_id)?;

        debug!(event_id = %event_id, guest = %guest.redacted(), resumed, "Guest session issued");

        Ok(GuestSessionResponse {
            guest_identifier: guest.as_str().to_string(),
            event_id: event_id.to_string(),
            token: issued.token,
            token_type: issued.token_type,
            expires_in: issued.expires_in,
        })
    }
}
