//! Geographic coordinates of a pin.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair as chosen on the map.
///
/// Values are stored as given. Ranges ([-90, 90] and [-180, 180]) are not
/// checked anywhere in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}
