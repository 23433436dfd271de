//! Shared builders for unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use pineat_domain::{Coordinates, Location, LocationId, NewLocation, UserId};
use uuid::Uuid;

use crate::infrastructure::ports::{AuthUser, Session};

// =============================================================================
// Identities
// =============================================================================

pub fn user_id(n: u128) -> UserId {
    UserId::from_uuid(Uuid::from_u128(0x1000 + n))
}

/// A session that does not expire.
pub fn session_for(user_id: UserId) -> Session {
    Session {
        access_token: format!("token-{user_id}"),
        refresh_token: None,
        expires_at: None,
        user: AuthUser { id: user_id, email: None },
    }
}

// =============================================================================
// Locations
// =============================================================================

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap()
}

/// A saved location; larger `n` means created later.
pub fn location(owner: UserId, n: u128, title: &str) -> Location {
    Location::new(
        LocationId::from_uuid(Uuid::from_u128(n)),
        owner,
        NewLocation::new(title, Coordinates::new(41.0 + n as f64, 29.0)),
    )
    .with_created_at(base_time() + Duration::minutes(n as i64))
}

// =============================================================================
// Images
// =============================================================================

/// A solid-colour PNG of the given size.
pub fn png_image(width: u32, height: u32) -> Vec<u8> {
    let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Route tracing output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("pineat_client=debug")
        .with_test_writer()
        .try_init();
}
