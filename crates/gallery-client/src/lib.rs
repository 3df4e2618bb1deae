//! # gallery-client
//!
//! Client side of the guest gallery:
//!
//! - [`GallerySelection`]: grid selection, category filter and lightbox state
//! - [`BulkDownloader`]: concurrent download of the selected photos with
//!   per-item failure isolation
//! - [`GalleryClient`]: `reqwest` client for the feedback HTTP API

pub mod api;
pub mod download;
pub mod error;
pub mod selection;

pub use api::{GalleryClient, HttpPhotoDownloader};
pub use download::{BulkDownloadReport, BulkDownloader, Notification, Notifier, PhotoDownloader};
pub use error::{ClientError, ClientResult};
pub use selection::{ClickOutcome, GallerySelection, Modifiers};
