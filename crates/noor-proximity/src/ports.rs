//! Driven ports for the two place sources.
//!
//! The facade only sees these traits, so tests and the no-database mode can
//! swap in in-memory implementations.

use async_trait::async_trait;
use noor_core::{Coordinate, PlaceCategory, PlaceRecord, VerifiedPlace};

use crate::error::SourceError;

/// Storage holding the curated, verified places.
#[async_trait]
pub trait VerifiedPlaceStore: Send + Sync {
    /// Fetch every verified place, pre-filtered to `category` when given.
    async fn fetch_verified_places(
        &self,
        category: Option<PlaceCategory>,
    ) -> Result<Vec<VerifiedPlace>, SourceError>;
}

/// Open geodata queried per request.
#[async_trait]
pub trait ExternalPlaceSource: Send + Sync {
    /// Fetch places of both categories within `radius_meters` of `origin`,
    /// with distances already measured from `origin`.
    async fn fetch_places(
        &self,
        origin: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<PlaceRecord>, SourceError>;
}
