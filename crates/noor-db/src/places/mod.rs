//! Database operations for the `places` table.

mod read;
mod types;
mod write;

pub use read::{count_verified_places, list_verified_places};
pub use types::{NewPlace, PlaceRow};
pub use write::upsert_places;
