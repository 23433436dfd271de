//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the client. Everything else is concrete types.
//! Ports exist for:
//! - Identity (hosted auth vs in-memory)
//! - Row storage (hosted REST vs in-memory)
//! - Blob storage (hosted storage vs in-memory)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;
pub mod types;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::LocationRepo;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{AuthPort, MediaStorePort};

pub use types::{AuthUser, Session};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockAuthPort, MockMediaStorePort};
#[cfg(test)]
pub use repos::MockLocationRepo;
#[cfg(test)]
pub use testing::MockRandomPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{AuthError, RepoError, UploadError};
