//! Saved-locations list screen.

use std::sync::Arc;

use pineat_domain::{Location, LocationId};

use crate::repositories::LocationRepository;

/// State behind the searchable list of the user's locations.
///
/// `locations()` is always a subsequence of `all()` in the same order.
pub struct ListPresenter {
    locations: Arc<LocationRepository>,
    full: Vec<Location>,
    filtered: Vec<Location>,
    query: String,
    error_message: Option<String>,
}

impl ListPresenter {
    pub fn new(locations: Arc<LocationRepository>) -> Self {
        Self {
            locations,
            full: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            error_message: None,
        }
    }

    /// Reload from the backend, newest first, keeping the current query.
    pub async fn refresh(&mut self) {
        self.error_message = None;

        match self.locations.list_for_current_user().await {
            Ok(locations) => {
                tracing::debug!(count = locations.len(), "Locations loaded");
                self.full = locations;
                self.rebuild_filtered();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load locations");
                self.error_message = Some(format!("Failed to load locations: {e}"));
            }
        }
    }

    /// Narrow the visible list to titles containing `text`, ignoring case.
    /// An empty `text` shows everything.
    pub fn apply_filter(&mut self, text: &str) {
        self.query = text.to_string();
        self.rebuild_filtered();
    }

    /// Delete a location and drop it from both lists without re-fetching.
    pub async fn remove(&mut self, id: LocationId) {
        self.error_message = None;

        if let Err(e) = self.locations.delete(id).await {
            tracing::warn!(location_id = %id, error = %e, "Failed to delete location");
            self.error_message = Some(format!("Failed to delete location: {e}"));
            return;
        }

        self.full.retain(|location| location.id() != id);
        self.filtered.retain(|location| location.id() != id);
    }

    /// Visible (filtered) locations.
    pub fn locations(&self) -> &[Location] {
        &self.filtered
    }

    pub fn all(&self) -> &[Location] {
        &self.full
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Visible row at `index`, e.g. to focus the map on a selection.
    pub fn location_at(&self, index: usize) -> Option<&Location> {
        self.filtered.get(index)
    }

    fn rebuild_filtered(&mut self) {
        self.filtered = self
            .full
            .iter()
            .filter(|location| location.title_matches(&self.query))
            .cloned()
            .collect();
    }
}
