//! In-memory repositories and a service harness for unit tests

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use gallery_common::auth::JwtService;
use gallery_common::FeedbackConfig;
use gallery_core::traits::{
    AuditLogRepository, FeedbackQuery, FeedbackRepository, PhotoRepository, RepoResult,
    SettingsRepository, ToggleOutcome, UpsertOutcome,
};
use gallery_core::{
    AuditEntry, DomainError, Feedback, FeedbackContent, FeedbackSettings, FeedbackSettingsPatch,
    FeedbackType, GuestIdentifier, Photo, PhotoStats, Snowflake, SnowflakeGenerator,
};
use parking_lot::Mutex;

use crate::services::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
pub struct InMemoryStore {
    photos: Mutex<Vec<Photo>>,
    feedback: Mutex<Vec<Feedback>>,
    settings: Mutex<Vec<FeedbackSettings>>,
    audit: Mutex<Vec<AuditEntry>>,
}

impl InMemoryStore {
    /// Stores a photo, replacing any existing one with the same id
    pub fn insert_photo(&self, photo: Photo) {
        let mut photos = self.photos.lock();
        photos.retain(|p| p.id != photo.id);
        photos.push(photo);
    }

    pub fn photo(&self, id: Snowflake) -> Option<Photo> {
        self.photos.lock().iter().find(|p| p.id == id).cloned()
    }

    pub fn feedback_rows(&self) -> usize {
        self.feedback.lock().len()
    }

    pub fn settings_rows(&self) -> usize {
        self.settings.lock().len()
    }

    pub fn audit_rows(&self) -> usize {
        self.audit.lock().len()
    }

    fn ensure_photo(&self, photo_id: Snowflake) -> RepoResult<()> {
        if self.photos.lock().iter().any(|p| p.id == photo_id) {
            Ok(())
        } else {
            Err(DomainError::PhotoNotFound(photo_id))
        }
    }
}

fn same_key(a: &Feedback, b: &Feedback) -> bool {
    a.event_id == b.event_id
        && a.photo_id == b.photo_id
        && a.feedback_type == b.feedback_type
        && a.guest_identifier == b.guest_identifier
}

fn oldest_first(rows: &mut [Feedback]) {
    rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl PhotoRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Photo>> {
        Ok(self.photo(id))
    }

    async fn find_by_event(
        &self,
        event_id: Snowflake,
        category: Option<&str>,
    ) -> RepoResult<Vec<Photo>> {
        let mut photos: Vec<_> = self
            .photos
            .lock()
            .iter()
            .filter(|p| p.event_id == event_id)
            .filter(|p| {
                category.map_or(true, |c| {
                    p.category
                        .as_deref()
                        .is_some_and(|own| own.to_lowercase() == c.to_lowercase())
                })
            })
            .cloned()
            .collect();
        photos.sort_by_key(|p| p.id);
        Ok(photos)
    }

    async fn find_ids_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let photos = PhotoRepository::find_by_event(self, event_id, None).await?;
        Ok(photos.into_iter().map(|p| p.id).collect())
    }

    async fn update_stats(&self, photo_id: Snowflake, stats: &PhotoStats) -> RepoResult<()> {
        let mut photos = self.photos.lock();
        let photo = photos
            .iter_mut()
            .find(|p| p.id == photo_id)
            .ok_or(DomainError::PhotoNotFound(photo_id))?;
        photo.apply_stats(stats);
        Ok(())
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Feedback>> {
        Ok(self.feedback.lock().iter().find(|f| f.id == id).cloned())
    }

    async fn toggle(&self, candidate: &Feedback) -> RepoResult<ToggleOutcome> {
        self.ensure_photo(candidate.photo_id)?;
        let mut rows = self.feedback.lock();
        if let Some(pos) = rows.iter().position(|f| same_key(f, candidate)) {
            rows.remove(pos);
            return Ok(ToggleOutcome::Removed);
        }
        rows.push(candidate.clone());
        Ok(ToggleOutcome::Added(candidate.clone()))
    }

    async fn upsert(
        &self,
        candidate: &Feedback,
        approve_on_update: bool,
    ) -> RepoResult<UpsertOutcome> {
        self.ensure_photo(candidate.photo_id)?;
        let mut rows = self.feedback.lock();
        if let Some(existing) = rows.iter_mut().find(|f| same_key(f, candidate)) {
            existing.rating = candidate.rating;
            existing.comment_text.clone_from(&candidate.comment_text);
            existing.guest_name = candidate.guest_name.clone().or(existing.guest_name.take());
            existing.guest_email = candidate.guest_email.clone().or(existing.guest_email.take());
            existing.ip_address.clone_from(&candidate.ip_address);
            existing.user_agent.clone_from(&candidate.user_agent);
            existing.is_approved = approve_on_update;
            existing.updated_at = Utc::now();
            return Ok(UpsertOutcome {
                feedback: existing.clone(),
                created: false,
            });
        }
        rows.push(candidate.clone());
        Ok(UpsertOutcome {
            feedback: candidate.clone(),
            created: true,
        })
    }

    async fn update_moderation(
        &self,
        id: Snowflake,
        is_approved: bool,
        is_hidden: bool,
    ) -> RepoResult<Option<Feedback>> {
        let mut rows = self.feedback.lock();
        Ok(rows.iter_mut().find(|f| f.id == id).map(|row| {
            row.is_approved = is_approved;
            row.is_hidden = is_hidden;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<Option<Feedback>> {
        let mut rows = self.feedback.lock();
        Ok(rows
            .iter()
            .position(|f| f.id == id)
            .map(|pos| rows.remove(pos)))
    }

    async fn find_visible_by_photo(&self, photo_id: Snowflake) -> RepoResult<Vec<Feedback>> {
        Ok(self
            .feedback
            .lock()
            .iter()
            .filter(|f| f.photo_id == photo_id && f.is_visible())
            .cloned()
            .collect())
    }

    async fn find_by_photo(
        &self,
        photo_id: Snowflake,
        query: &FeedbackQuery,
    ) -> RepoResult<Vec<Feedback>> {
        let mut rows: Vec<_> = self
            .feedback
            .lock()
            .iter()
            .filter(|f| f.photo_id == photo_id && query.matches(f))
            .cloned()
            .collect();
        oldest_first(&mut rows);
        rows.reverse();
        Ok(rows)
    }

    async fn find_pending(&self, event_id: Option<Snowflake>) -> RepoResult<Vec<Feedback>> {
        let mut rows: Vec<_> = self
            .feedback
            .lock()
            .iter()
            .filter(|f| f.is_pending() && event_id.map_or(true, |e| f.event_id == e))
            .cloned()
            .collect();
        oldest_first(&mut rows);
        Ok(rows)
    }

    async fn find_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Feedback>> {
        let mut rows: Vec<_> = self
            .feedback
            .lock()
            .iter()
            .filter(|f| f.event_id == event_id)
            .cloned()
            .collect();
        oldest_first(&mut rows);
        Ok(rows)
    }

    async fn photo_ids_for_guest(
        &self,
        event_id: Snowflake,
        guest: &GuestIdentifier,
        feedback_type: FeedbackType,
    ) -> RepoResult<Vec<Snowflake>> {
        let mut ids: Vec<_> = self
            .feedback
            .lock()
            .iter()
            .filter(|f| {
                f.event_id == event_id
                    && f.feedback_type == feedback_type
                    && f.is_from(guest)
                    && f.is_visible()
            })
            .map(|f| f.photo_id)
            .collect();
        ids.sort();
        Ok(ids)
    }
}

#[async_trait]
impl SettingsRepository for InMemoryStore {
    async fn find(&self, event_id: Snowflake) -> RepoResult<Option<FeedbackSettings>> {
        Ok(self
            .settings
            .lock()
            .iter()
            .find(|s| s.event_id == event_id)
            .cloned())
    }

    async fn apply_patch(
        &self,
        event_id: Snowflake,
        patch: &FeedbackSettingsPatch,
    ) -> RepoResult<FeedbackSettings> {
        let mut rows = self.settings.lock();
        let index = match rows.iter().position(|s| s.event_id == event_id) {
            Some(index) => index,
            None => {
                rows.push(FeedbackSettings::defaults_for(event_id));
                rows.len() - 1
            }
        };
        rows[index].apply(patch);
        Ok(rows[index].clone())
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryStore {
    async fn create(&self, entry: &AuditEntry) -> RepoResult<()> {
        self.audit.lock().push(entry.clone());
        Ok(())
    }

    async fn find_by_event(&self, event_id: Snowflake, limit: i64) -> RepoResult<Vec<AuditEntry>> {
        let mut entries: Vec<_> = self
            .audit
            .lock()
            .iter()
            .filter(|e| e.event_id == event_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        entries.truncate(usize::try_from(limit.clamp(1, 500)).unwrap_or(500));
        Ok(entries)
    }
}

/// Service context wired to one shared in-memory store
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub store: Arc<InMemoryStore>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(FeedbackConfig::default())
    }

    pub fn with_config(config: FeedbackConfig) -> Self {
        let store = Arc::new(InMemoryStore::default());
        let ctx = ServiceContextBuilder::default()
            .photo_repo(store.clone())
            .feedback_repo(store.clone())
            .settings_repo(store.clone())
            .audit_repo(store.clone())
            .jwt_service(Arc::new(JwtService::new(
                "test-secret-key-that-is-long-enough",
                3600,
                900,
            )))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .feedback_config(config)
            .build()
            .expect("test context");
        Self { ctx, store }
    }

    pub fn seed_photo(&self, event_id: Snowflake) -> Photo {
        let id = self.ctx.generate_id();
        let photo = Photo::new(
            id,
            event_id,
            format!("IMG_{id}.jpg"),
            format!("https://cdn.example.test/{event_id}/{id}.jpg"),
        );
        self.store.insert_photo(photo.clone());
        photo
    }

    /// Approved feedback row for `photo_id` from `guest`, not yet stored
    pub fn feedback(&self, photo_id: Snowflake, guest: &str, content: FeedbackContent) -> Feedback {
        let event_id = self
            .store
            .photo(photo_id)
            .map_or(Snowflake::new(0), |p| p.event_id);
        Feedback::new(
            self.ctx.generate_id(),
            event_id,
            photo_id,
            GuestIdentifier::new(guest).expect("test guest identifier"),
            content,
            true,
        )
    }
}
