//! Location entity - a saved pin on the map
//!
//! Stored as one row of the `locations` table. The wire shape keeps the
//! backend's column names (`user_id`, flat `latitude`/`longitude`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, UserId};
use crate::value_objects::Coordinates;

/// A location owned by exactly one user.
///
/// `id` and `owner_id` are fixed at construction and have no setters; there is
/// no update path for a saved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    #[serde(rename = "user_id")]
    owner_id: UserId,
    title: String,
    description: String,
    #[serde(flatten)]
    coordinates: Coordinates,
    image_url: Option<String>,
    /// Assigned by the backend on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

/// Fields a user supplies when dropping a new pin.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub title: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub image_url: Option<String>,
}

impl NewLocation {
    pub fn new(title: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            coordinates,
            image_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

impl Location {
    /// Build a record for insertion. `created_at` stays empty until the
    /// backend assigns it.
    pub fn new(id: LocationId, owner_id: UserId, fields: NewLocation) -> Self {
        Self {
            id,
            owner_id,
            title: fields.title,
            description: fields.description,
            coordinates: fields.coordinates,
            image_url: fields.image_url,
            created_at: None,
        }
    }

    /// Stamp the backend-assigned creation time (used by storage adapters).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.longitude
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// True when a non-empty photo URL is attached.
    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Case-insensitive substring match on the title. An empty query matches
    /// everything.
    pub fn title_matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn pizza_place() -> Location {
        Location::new(
            LocationId::from_uuid(Uuid::from_u128(1)),
            UserId::from_uuid(Uuid::from_u128(2)),
            NewLocation::new("Pizza Place", Coordinates::new(41.0, 29.0))
                .with_description("thin crust"),
        )
    }

    #[test]
    fn serializes_with_backend_column_names() {
        let json = serde_json::to_value(pizza_place()).unwrap();

        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000001");
        assert_eq!(json["user_id"], "00000000-0000-0000-0000-000000000002");
        assert_eq!(json["title"], "Pizza Place");
        assert_eq!(json["description"], "thin crust");
        assert_eq!(json["latitude"], 41.0);
        assert_eq!(json["longitude"], 29.0);
        assert!(json["image_url"].is_null());
        assert!(json.get("created_at").is_none());
        assert!(json.get("owner_id").is_none());
    }

    #[test]
    fn deserializes_backend_row() {
        let row = serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "user_id": "00000000-0000-0000-0000-000000000002",
            "title": "Pizza Place",
            "description": "",
            "latitude": 41.0,
            "longitude": 29.0,
            "image_url": "https://cdn.example/a.jpg",
            "created_at": "2025-12-20T10:00:00Z"
        });

        let location: Location = serde_json::from_value(row).unwrap();

        assert_eq!(location.owner_id(), UserId::from_uuid(Uuid::from_u128(2)));
        assert_eq!(location.coordinates(), Coordinates::new(41.0, 29.0));
        assert_eq!(location.image_url(), Some("https://cdn.example/a.jpg"));
        assert!(location.has_image());
        assert_eq!(
            location.created_at(),
            Some(Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn empty_image_url_is_not_an_image() {
        let location = Location::new(
            LocationId::new(),
            UserId::new(),
            NewLocation::new("Cafe", Coordinates::default()).with_image_url(""),
        );

        assert_eq!(location.image_url(), Some(""));
        assert!(!location.has_image());
    }

    #[test]
    fn title_match_ignores_case() {
        let location = pizza_place();

        assert!(location.title_matches("pizza"));
        assert!(location.title_matches("PLACE"));
        assert!(location.title_matches("za pl"));
        assert!(location.title_matches(""));
        assert!(!location.title_matches("burger"));
    }
}
