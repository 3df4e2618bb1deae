//! Gallery grid selection model
//!
//! Single-threaded UI state: the photo list, an optional category filter,
//! multi-select mode, the selected ids and the lightbox position. Indices
//! always refer to the currently visible (category-filtered) photos.

use std::collections::BTreeSet;

use gallery_service::dto::PhotoResponse;

/// Keyboard modifiers held during a click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        meta: false,
    };

    pub const META: Self = Self {
        ctrl: false,
        meta: true,
    };

    fn toggles_selection(self) -> bool {
        self.ctrl || self.meta
    }
}

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected,
    Deselected,
    OpenedLightbox(usize),
    /// The photo is not visible under the current filter
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct GallerySelection {
    photos: Vec<PhotoResponse>,
    category: Option<String>,
    multi_select: bool,
    selected: BTreeSet<String>,
    lightbox: Option<usize>,
}

impl GallerySelection {
    pub fn new(photos: Vec<PhotoResponse>) -> Self {
        Self {
            photos,
            ..Self::default()
        }
    }

    /// Replace the photo list, keeping the selection of photos still present
    pub fn set_photos(&mut self, photos: Vec<PhotoResponse>) {
        self.photos = photos;
        let present: BTreeSet<&str> = self.photos.iter().map(|p| p.id.as_str()).collect();
        self.selected.retain(|id| present.contains(id.as_str()));
        self.lightbox = None;
    }

    /// Photos under the current category filter, in list order
    pub fn visible(&self) -> Vec<&PhotoResponse> {
        self.photos
            .iter()
            .filter(|p| match &self.category {
                Some(category) => p
                    .category
                    .as_deref()
                    .is_some_and(|c| same_category(c, category)),
                None => true,
            })
            .collect()
    }

    pub fn click(&mut self, photo_id: &str, modifiers: Modifiers) -> ClickOutcome {
        let Some(index) = self.visible().iter().position(|p| p.id == photo_id) else {
            return ClickOutcome::Ignored;
        };

        if self.multi_select || modifiers.toggles_selection() {
            if self.selected.remove(photo_id) {
                ClickOutcome::Deselected
            } else {
                self.selected.insert(photo_id.to_string());
                ClickOutcome::Selected
            }
        } else {
            self.lightbox = Some(index);
            ClickOutcome::OpenedLightbox(index)
        }
    }

    /// Switch multi-select mode; leaving it clears the selection
    pub fn toggle_multi_select(&mut self) -> bool {
        self.multi_select = !self.multi_select;
        if !self.multi_select {
            self.selected.clear();
        }
        self.multi_select
    }

    /// Change the category filter. A real change clears the selection and
    /// closes the lightbox.
    pub fn set_category(&mut self, category: Option<String>) {
        let category = category.filter(|c| !c.trim().is_empty());
        let unchanged = match (&category, &self.category) {
            (Some(next), Some(current)) => same_category(next, current),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }
        self.category = category;
        self.selected.clear();
        self.lightbox = None;
    }

    /// Select every visible photo
    pub fn select_all(&mut self) {
        let ids: Vec<String> = self.visible().iter().map(|p| p.id.clone()).collect();
        self.selected.extend(ids);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_selected(&self, photo_id: &str) -> bool {
        self.selected.contains(photo_id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected photos in list order
    pub fn selected_photos(&self) -> Vec<PhotoResponse> {
        self.photos
            .iter()
            .filter(|p| self.selected.contains(&p.id))
            .cloned()
            .collect()
    }

    // === Lightbox ===

    pub fn lightbox_index(&self) -> Option<usize> {
        self.lightbox
    }

    pub fn lightbox_photo(&self) -> Option<&PhotoResponse> {
        self.lightbox.and_then(|i| self.visible().get(i).copied())
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox = None;
    }

    /// Move to the next visible photo, wrapping at the end
    pub fn lightbox_next(&mut self) -> Option<usize> {
        let len = self.visible().len();
        self.lightbox = self.lightbox.filter(|_| len > 0).map(|i| (i + 1) % len);
        self.lightbox
    }

    /// Move to the previous visible photo, wrapping at the start
    pub fn lightbox_previous(&mut self) -> Option<usize> {
        let len = self.visible().len();
        self.lightbox = self
            .lightbox
            .filter(|_| len > 0)
            .map(|i| (i + len - 1) % len);
        self.lightbox
    }
}

/// Categories compare the way the server filters them, ignoring case
fn same_category(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
