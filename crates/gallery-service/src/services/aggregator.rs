//! Feedback aggregator - keeps the denormalized photo counters in sync

use gallery_core::{PhotoStats, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AggregatorService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AggregatorService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Recompute every counter of a photo from its visible feedback rows and
    /// write them in one update. Idempotent.
    #[instrument(skip(self))]
    pub async fn recompute(&self, photo_id: Snowflake) -> ServiceResult<PhotoStats> {
        let rows = self.ctx.feedback_repo().find_visible_by_photo(photo_id).await?;
        let stats = PhotoStats::from_feedback(&rows);
        self.ctx.photo_repo().update_stats(photo_id, &stats).await?;

        debug!(
            photo_id = %photo_id,
            likes = stats.like_count,
            favorites = stats.favorite_count,
            comments = stats.comment_count,
            average_rating = stats.average_rating,
            "Photo stats recomputed"
        );

        Ok(stats)
    }
}
