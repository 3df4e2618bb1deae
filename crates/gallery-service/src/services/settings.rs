//! Per-event feedback settings

use gallery_core::entities::{FeedbackSettings, FeedbackSettingsPatch};
use gallery_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::FeedbackSettingsResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct SettingsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SettingsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Stored settings, or the defaults when the event has no row yet.
    /// Never writes.
    #[instrument(skip(self))]
    pub async fn load(&self, event_id: Snowflake) -> ServiceResult<FeedbackSettings> {
        Ok(self
            .ctx
            .settings_repo()
            .find(event_id)
            .await?
            .unwrap_or_else(|| FeedbackSettings::defaults_for(event_id)))
    }

    pub async fn get_settings(&self, event_id: Snowflake) -> ServiceResult<FeedbackSettingsResponse> {
        self.load(event_id).await.map(FeedbackSettingsResponse::from)
    }

    /// Write the fields present in `patch`; absent fields keep their stored
    /// (or default) values
    #[instrument(skip(self))]
    pub async fn update_settings(
        &self,
        event_id: Snowflake,
        patch: FeedbackSettingsPatch,
    ) -> ServiceResult<FeedbackSettingsResponse> {
        let saved = self.ctx.settings_repo().apply_patch(event_id, &patch).await?;

        info!(event_id = %event_id, ?patch, "Feedback settings updated");

        Ok(FeedbackSettingsResponse::from(saved))
    }
}
