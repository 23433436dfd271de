//! Value objects shared by location records.

mod coordinates;

pub use coordinates::Coordinates;
