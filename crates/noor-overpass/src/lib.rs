//! Client for the Overpass API (OpenStreetMap) that finds mosques and halal
//! food around a point and normalizes them into [`noor_core::PlaceRecord`]s.

pub mod client;
pub mod error;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::{OverpassClient, DEFAULT_ENDPOINT};
pub use error::OverpassError;
pub use normalize::{normalize_element, normalize_elements};
pub use query::build_query;
pub use types::{OverpassCenter, OverpassElement, OverpassResponse};
