//! Pineat client library.
//!
//! Data access for the Pineat location bookmarking app: sign-in, saved
//! locations, and photo uploads against a hosted backend-as-a-service.
//!
//! ## Structure
//!
//! - `infrastructure/` - Ports and their implementations (hosted backend, in-memory)
//! - `repositories/` - Wrappers coordinating ports for use cases
//! - `use_cases/` - Presenters holding screen state for the UI
//! - `config` - Connection settings
//! - `app` - Application composition

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

/// Shared builders for unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
pub use config::{ClientConfig, ConfigError};
pub use infrastructure::ports::{AuthError, AuthUser, RepoError, Session, UploadError};
pub use pineat_domain::{Coordinates, Location, LocationId, NewLocation, UserId};
pub use use_cases::{AuthFlow, ListPresenter, PinComposer, SaveError, SaveOutcome};
