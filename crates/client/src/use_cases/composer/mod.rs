//! New-pin form and map annotations.

use std::sync::Arc;

use pineat_domain::{Coordinates, Location, NewLocation};

use crate::infrastructure::ports::{RepoError, UploadError};
use crate::repositories::{LocationRepository, MediaStore};

/// Result of a save attempt from the new-pin form.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Empty title; nothing was sent.
    Rejected,
    Saved(Location),
    /// See `PinComposer::error_message`.
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Draft state for dropping a pin, plus the pins shown on the map.
pub struct PinComposer {
    locations: Arc<LocationRepository>,
    media: Arc<MediaStore>,
    chosen: Coordinates,
    pins: Vec<Location>,
    error_message: Option<String>,
}

impl PinComposer {
    pub fn new(locations: Arc<LocationRepository>, media: Arc<MediaStore>) -> Self {
        Self {
            locations,
            media,
            chosen: Coordinates::default(),
            pins: Vec::new(),
            error_message: None,
        }
    }

    /// Record where the user tapped the map.
    pub fn choose(&mut self, coordinates: Coordinates) {
        self.chosen = coordinates;
    }

    pub fn chosen(&self) -> Coordinates {
        self.chosen
    }

    pub fn pins(&self) -> &[Location] {
        &self.pins
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Save the draft at the chosen coordinates.
    ///
    /// The photo, when given, is uploaded before the row is written. If the
    /// write then fails the uploaded photo stays in storage.
    pub async fn save(
        &mut self,
        title: &str,
        description: &str,
        image: Option<&[u8]>,
    ) -> SaveOutcome {
        self.error_message = None;

        if title.is_empty() {
            tracing::debug!("Save rejected: empty title");
            return SaveOutcome::Rejected;
        }

        match self.submit(title, description, image).await {
            Ok(location) => {
                self.refresh_pins().await;
                SaveOutcome::Saved(location)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save location");
                self.error_message = Some(format!("Failed to save location: {e}"));
                SaveOutcome::Failed
            }
        }
    }

    /// Reload the map pins for the signed-in user.
    pub async fn refresh_pins(&mut self) {
        self.error_message = None;
        match self.locations.list_for_current_user().await {
            Ok(pins) => self.pins = pins,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load pins");
                self.error_message = Some(format!("Failed to load pins: {e}"));
            }
        }
    }

    async fn submit(
        &self,
        title: &str,
        description: &str,
        image: Option<&[u8]>,
    ) -> Result<Location, SaveError> {
        let image_url = match image {
            Some(bytes) => self.media.upload_image(bytes).await?,
            None => String::new(),
        };

        let fields = NewLocation::new(title, self.chosen)
            .with_description(description)
            .with_image_url(image_url.clone());

        match self.locations.create(fields).await {
            Ok(location) => Ok(location),
            Err(e) => {
                if !image_url.is_empty() {
                    tracing::warn!(%image_url, error = %e, "Uploaded photo left without a location");
                }
                Err(e.into())
            }
        }
    }
}
