//! Pineat domain types.
//!
//! Location records, their identifiers and coordinates. No I/O lives here;
//! the client crate moves these types across the backend boundary.

pub mod entities;
pub mod ids;
pub mod value_objects;

pub use entities::{Location, NewLocation};
pub use ids::{LocationId, UserId};
pub use value_objects::Coordinates;
