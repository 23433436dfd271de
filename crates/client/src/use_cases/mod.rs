//! Presenters driven by the UI layer.
//!
//! Each presenter owns its screen state and turns every failure into an
//! `error_message` for display. Nothing here panics or retries.

pub mod auth;
pub mod composer;
pub mod list;

pub use auth::AuthFlow;
pub use composer::{PinComposer, SaveError, SaveOutcome};
pub use list::ListPresenter;
