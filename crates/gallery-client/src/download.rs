//! Bulk photo download
//!
//! Every selected photo is downloaded concurrently. A failing item is logged
//! and counted but never aborts its siblings. There is no retry and no
//! cancellation.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures::future::join_all;
use gallery_service::dto::PhotoResponse;
use tracing::{info, warn};

use crate::error::{ClientError, ClientResult};

/// Fetches one photo and stores it somewhere
#[async_trait]
pub trait PhotoDownloader: Send + Sync {
    async fn download(&self, photo: &PhotoResponse) -> ClientResult<PathBuf>;
}

/// User-facing progress messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Started(usize),
    Completed { succeeded: usize, failed: usize },
    /// Every item failed
    Failed,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDownloadReport {
    pub succeeded: usize,
    pub failed: usize,
    pub paths: Vec<PathBuf>,
}

impl BulkDownloadReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Holds the busy flag for one batch and releases it when dropped, including
/// when the batch future is cancelled or a downloader panics
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct BulkDownloader<D, N> {
    downloader: D,
    notifier: N,
    busy: AtomicBool,
}

impl<D: PhotoDownloader, N: Notifier> BulkDownloader<D, N> {
    pub fn new(downloader: D, notifier: N) -> Self {
        Self {
            downloader,
            notifier,
            busy: AtomicBool::new(false),
        }
    }

    /// True while a batch is in flight; the download action should be disabled
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Download `photos` concurrently.
    ///
    /// Returns `Busy` if another batch is still running. An empty selection
    /// is a no-op.
    pub async fn download(&self, photos: &[PhotoResponse]) -> ClientResult<BulkDownloadReport> {
        if photos.is_empty() {
            return Ok(BulkDownloadReport::default());
        }
        let guard = BusyGuard::acquire(&self.busy).ok_or(ClientError::Busy)?;

        self.notifier.notify(Notification::Started(photos.len()));

        let results = join_all(photos.iter().map(|photo| async move {
            let result = self.downloader.download(photo).await;
            if let Err(e) = &result {
                warn!(photo_id = %photo.id, filename = %photo.filename, error = %e, "Photo download failed");
            }
            result
        }))
        .await;

        let mut report = BulkDownloadReport::default();
        for result in results {
            match result {
                Ok(path) => {
                    report.succeeded += 1;
                    report.paths.push(path);
                }
                Err(_) => report.failed += 1,
            }
        }

        drop(guard);

        if report.succeeded > 0 {
            self.notifier.notify(Notification::Completed {
                succeeded: report.succeeded,
                failed: report.failed,
            });
        } else {
            self.notifier.notify(Notification::Failed);
        }

        info!(
            succeeded = report.succeeded,
            failed = report.failed,
            "Bulk download finished"
        );

        Ok(report)
    }
}
