//! Photo service - gallery listing and the guest's "my likes / my favorites" filter

use gallery_core::{DomainError, FeedbackType, GuestIdentifier, PhotoFilter, Snowflake};
use tracing::{debug, instrument};

use crate::dto::{FilteredPhotosResponse, PhotoResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct PhotoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PhotoService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Photos of an event with their counters, optionally one category only
    #[instrument(skip(self))]
    pub async fn list_photos(
        &self,
        event_id: Snowflake,
        category: Option<&str>,
    ) -> ServiceResult<Vec<PhotoResponse>> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        let photos = self.ctx.photo_repo().find_by_event(event_id, category).await?;
        Ok(photos.iter().map(PhotoResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_photo(&self, photo_id: Snowflake) -> ServiceResult<PhotoResponse> {
        let photo = self
            .ctx
            .photo_repo()
            .find_by_id(photo_id)
            .await?
            .ok_or(DomainError::PhotoNotFound(photo_id))?;
        Ok(PhotoResponse::from(photo))
    }

    /// Ids of photos matching the guest's own likes and favorites.
    ///
    /// An inactive filter returns every photo of the event.
    #[instrument(skip(self, guest), fields(guest = %guest.redacted()))]
    pub async fn filtered_photos(
        &self,
        event_id: Snowflake,
        guest: &GuestIdentifier,
        filter: PhotoFilter,
    ) -> ServiceResult<FilteredPhotosResponse> {
        let ids = if filter.is_active() {
            let liked = self.own_photo_ids(event_id, guest, filter.liked, FeedbackType::Like).await?;
            let favorited = self
                .own_photo_ids(event_id, guest, filter.favorited, FeedbackType::Favorite)
                .await?;
            filter.combine(&liked, &favorited)
        } else {
            self.ctx.photo_repo().find_ids_by_event(event_id).await?
        };

        debug!(event_id = %event_id, matches = ids.len(), "Filtered gallery");

        Ok(FilteredPhotosResponse {
            photo_ids: ids.iter().map(ToString::to_string).collect(),
            liked: filter.liked,
            favorited: filter.favorited,
            operator: filter.operator,
        })
    }

    async fn own_photo_ids(
        &self,
        event_id: Snowflake,
        guest: &GuestIdentifier,
        wanted: bool,
        feedback_type: FeedbackType,
    ) -> ServiceResult<Vec<Snowflake>> {
        if !wanted {
            return Ok(Vec::new());
        }
        Ok(self
            .ctx
            .feedback_repo()
            .photo_ids_for_guest(event_id, guest, feedback_type)
            .await?)
    }
}
