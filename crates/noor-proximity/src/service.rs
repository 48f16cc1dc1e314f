//! The proximity facade: validate, fan out to both sources, merge.

use std::sync::Arc;
use std::time::Duration;

use noor_core::{merge_places, PlaceRecord, PlaceSource};
use serde::Serialize;

use crate::error::ProximityError;
use crate::ports::{ExternalPlaceSource, VerifiedPlaceStore};
use crate::query::{ProximityParams, ProximityQuery, RESULT_LIMIT};
use crate::sources::{ExternalPlaces, LocalPlaces};

/// How many places in the final result came from each source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    pub local: usize,
    pub external: usize,
}

impl SourceCounts {
    fn tally(places: &[PlaceRecord]) -> Self {
        let local = places
            .iter()
            .filter(|place| place.source == PlaceSource::Local)
            .count();
        Self {
            local,
            external: places.len() - local,
        }
    }
}

/// Echo of the normalized query plus result counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityMeta {
    pub lat: f64,
    pub lng: f64,
    pub radius: u32,
    #[serde(rename = "type")]
    pub place_type: &'static str,
    pub total: usize,
    pub sources: SourceCounts,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProximityResult {
    pub data: Vec<PlaceRecord>,
    pub meta: ProximityMeta,
}

/// Entry point for proximity searches.
#[derive(Clone)]
pub struct ProximityService {
    local: LocalPlaces,
    external: ExternalPlaces,
    limit: usize,
}

impl ProximityService {
    #[must_use]
    pub fn new(
        store: Arc<dyn VerifiedPlaceStore>,
        external: Arc<dyn ExternalPlaceSource>,
        external_timeout: Duration,
    ) -> Self {
        Self {
            local: LocalPlaces::new(store),
            external: ExternalPlaces::new(external, external_timeout),
            limit: RESULT_LIMIT,
        }
    }

    /// Override the result cap.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Validate raw parameters and run the search.
    ///
    /// # Errors
    ///
    /// Returns [`ProximityError::InvalidQuery`] if the coordinate is missing
    /// or invalid. Source failures never surface here.
    pub async fn find_proximities(
        &self,
        params: &ProximityParams,
    ) -> Result<ProximityResult, ProximityError> {
        let query = ProximityQuery::from_params(params)?;
        Ok(self.search(&query).await)
    }

    /// Run a search for an already validated query.
    ///
    /// Both sources are polled concurrently, so latency is that of the slower
    /// one.
    pub async fn search(&self, query: &ProximityQuery) -> ProximityResult {
        let radius = query.radius();
        let (local, external) = tokio::join!(
            self.local.places(query.origin, radius, query.category),
            self.external.places(query.origin, radius),
        );

        let fetched_local = local.len();
        let fetched_external = external.len();
        let data = merge_places(local, external, radius, query.category, self.limit);
        let sources = SourceCounts::tally(&data);

        tracing::debug!(
            lat = query.origin.latitude,
            lng = query.origin.longitude,
            radius = query.radius_meters,
            fetched_local,
            fetched_external,
            total = data.len(),
            "proximity search complete"
        );

        ProximityResult {
            meta: ProximityMeta {
                lat: query.origin.latitude,
                lng: query.origin.longitude,
                radius: query.radius_meters,
                place_type: query.type_label(),
                total: data.len(),
                sources,
            },
            data,
        }
    }
}
