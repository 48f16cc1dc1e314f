//! Proximity search over the verified place store and OpenStreetMap.
//!
//! [`ProximityService`] runs both sources concurrently, absorbs their
//! failures, and merges the results with [`noor_core::merge_places`]. The
//! only error a caller can see is [`ProximityError::InvalidQuery`].

pub mod adapters;
pub mod error;
pub mod ports;
pub mod query;
pub mod service;
pub mod sources;

pub use adapters::{PgVerifiedPlaceStore, StaticPlaceStore};
pub use error::{ProximityError, SourceError};
pub use ports::{ExternalPlaceSource, VerifiedPlaceStore};
pub use query::{
    parse_coordinate, ProximityParams, ProximityQuery, DEFAULT_RADIUS_M, MAX_RADIUS_M, MIN_RADIUS_M,
    RESULT_LIMIT,
};
pub use service::{ProximityMeta, ProximityResult, ProximityService, SourceCounts};
pub use sources::{ExternalPlaces, LocalPlaces, DEFAULT_EXTERNAL_TIMEOUT};
