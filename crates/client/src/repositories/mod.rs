//! Repository modules - wrappers around port traits.
//!
//! Each wrapper coordinates its ports with the small amount of logic that sits
//! between a presenter and the backend.

pub mod location;
pub mod media;

pub use location::LocationRepository;
pub use media::{encode_jpeg, MediaStore, JPEG_QUALITY};
