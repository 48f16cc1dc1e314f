//! Place sources that never fail: each catches its own errors and returns
//! plain data.

use std::sync::Arc;
use std::time::Duration;

use noor_core::{fallback_places, Coordinate, PlaceCategory, PlaceRecord, VerifiedPlace};

use crate::ports::{ExternalPlaceSource, VerifiedPlaceStore};

/// Upper bound on one external lookup, on top of the HTTP client's own timeout.
pub const DEFAULT_EXTERNAL_TIMEOUT: Duration =
    Duration::from_secs(noor_core::DEFAULT_OVERPASS_TIMEOUT_SECS);

/// Verified places within a radius, degrading to the built-in seed set when
/// the store cannot be read.
#[derive(Clone)]
pub struct LocalPlaces {
    store: Arc<dyn VerifiedPlaceStore>,
}

impl LocalPlaces {
    #[must_use]
    pub fn new(store: Arc<dyn VerifiedPlaceStore>) -> Self {
        Self { store }
    }

    /// Verified places within `radius_meters` of `origin`, unsorted.
    pub async fn places(
        &self,
        origin: Coordinate,
        radius_meters: f64,
        category: Option<PlaceCategory>,
    ) -> Vec<PlaceRecord> {
        let verified = match self.store.fetch_verified_places(category).await {
            Ok(places) => places,
            Err(e) => {
                tracing::warn!(error = %e, "verified place store failed; serving seed places");
                fallback_places()
                    .into_iter()
                    .filter(|place| category.is_none_or(|c| place.category == c))
                    .collect()
            }
        };

        within_radius(&verified, origin, radius_meters)
    }
}

fn within_radius(
    places: &[VerifiedPlace],
    origin: Coordinate,
    radius_meters: f64,
) -> Vec<PlaceRecord> {
    places
        .iter()
        .map(|place| place.to_record(origin))
        .filter(|record| record.distance_meters <= radius_meters)
        .collect()
}

/// Open-data places around a point; any failure yields an empty list.
#[derive(Clone)]
pub struct ExternalPlaces {
    source: Arc<dyn ExternalPlaceSource>,
    timeout: Duration,
}

impl ExternalPlaces {
    #[must_use]
    pub fn new(source: Arc<dyn ExternalPlaceSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Places of both categories around `origin`.
    pub async fn places(&self, origin: Coordinate, radius_meters: f64) -> Vec<PlaceRecord> {
        let fetch = self.source.fetch_places(origin, radius_meters);
        match tokio::time::timeout(self.timeout, fetch).await {
            Ok(Ok(places)) => places,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "external place lookup failed");
                Vec::new()
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "external place lookup timed out"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use noor_core::PlaceSource;

    use super::*;
    use crate::adapters::StaticPlaceStore;
    use crate::error::SourceError;

    const MAKKAH: Coordinate = Coordinate::new(21.4225, 39.8262);

    struct FailingStore;

    #[async_trait]
    impl VerifiedPlaceStore for FailingStore {
        async fn fetch_verified_places(
            &self,
            _category: Option<PlaceCategory>,
        ) -> Result<Vec<VerifiedPlace>, SourceError> {
            Err(SourceError::LocalUnavailable(
                "connection refused".to_string(),
            ))
        }
    }

    struct FailingExternal;

    #[async_trait]
    impl ExternalPlaceSource for FailingExternal {
        async fn fetch_places(
            &self,
            _origin: Coordinate,
            _radius_meters: f64,
        ) -> Result<Vec<PlaceRecord>, SourceError> {
            Err(SourceError::ExternalUnavailable("dns failure".to_string()))
        }
    }

    struct SlowExternal;

    #[async_trait]
    impl ExternalPlaceSource for SlowExternal {
        async fn fetch_places(
            &self,
            _origin: Coordinate,
            _radius_meters: f64,
        ) -> Result<Vec<PlaceRecord>, SourceError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn local_places_are_filtered_by_radius() {
        let local = LocalPlaces::new(Arc::new(StaticPlaceStore::fallback()));

        let places = local.places(MAKKAH, 5_000.0, None).await;

        // Masjid al-Haram and the Makkah kitchen; Madinah is ~340 km away.
        assert_eq!(places.len(), 2);
        assert!(places
            .iter()
            .all(|p| p.source == PlaceSource::Local && p.verified));
        assert!(places.iter().all(|p| p.distance_meters <= 5_000.0));
    }

    #[tokio::test]
    async fn store_failure_degrades_to_seed_places() {
        let local = LocalPlaces::new(Arc::new(FailingStore));

        let places = local
            .places(MAKKAH, 5_000.0, Some(PlaceCategory::Mosque))
            .await;

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, "place-masjid-haram");
        assert!(places[0].distance_meters.abs() < 1e-6);
    }

    #[tokio::test]
    async fn external_failure_yields_empty_list() {
        let external = ExternalPlaces::new(Arc::new(FailingExternal), DEFAULT_EXTERNAL_TIMEOUT);
        assert!(external.places(MAKKAH, 5_000.0).await.is_empty());
    }

    #[tokio::test]
    async fn external_timeout_yields_empty_list() {
        let external = ExternalPlaces::new(Arc::new(SlowExternal), Duration::from_millis(50));
        assert!(external.places(MAKKAH, 5_000.0).await.is_empty());
    }
}
