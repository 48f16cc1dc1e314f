//! Port implementations backed by Postgres, Overpass, and in-memory data.

use async_trait::async_trait;
use noor_core::{fallback_places, Coordinate, PlaceCategory, PlaceRecord, VerifiedPlace};
use noor_overpass::OverpassClient;
use sqlx::PgPool;

use crate::error::SourceError;
use crate::ports::{ExternalPlaceSource, VerifiedPlaceStore};

/// Reads verified places from the `places` table.
#[derive(Debug, Clone)]
pub struct PgVerifiedPlaceStore {
    pool: PgPool,
}

impl PgVerifiedPlaceStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerifiedPlaceStore for PgVerifiedPlaceStore {
    async fn fetch_verified_places(
        &self,
        category: Option<PlaceCategory>,
    ) -> Result<Vec<VerifiedPlace>, SourceError> {
        noor_db::list_verified_places(&self.pool, category)
            .await
            .map_err(|e| SourceError::LocalUnavailable(e.to_string()))
    }
}

/// Fixed in-memory store, used when no database is configured.
#[derive(Debug, Clone)]
pub struct StaticPlaceStore {
    places: Vec<VerifiedPlace>,
}

impl StaticPlaceStore {
    #[must_use]
    pub fn new(places: Vec<VerifiedPlace>) -> Self {
        Self { places }
    }

    /// Store serving the built-in seed set.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(fallback_places())
    }
}

#[async_trait]
impl VerifiedPlaceStore for StaticPlaceStore {
    async fn fetch_verified_places(
        &self,
        category: Option<PlaceCategory>,
    ) -> Result<Vec<VerifiedPlace>, SourceError> {
        Ok(self
            .places
            .iter()
            .filter(|place| category.is_none_or(|c| place.category == c))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ExternalPlaceSource for OverpassClient {
    async fn fetch_places(
        &self,
        origin: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<PlaceRecord>, SourceError> {
        OverpassClient::fetch_places(self, origin, radius_meters)
            .await
            .map_err(|e| SourceError::ExternalUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_store_filters_by_category() {
        let store = StaticPlaceStore::fallback();

        let all = store.fetch_verified_places(None).await.unwrap();
        let food = store
            .fetch_verified_places(Some(PlaceCategory::HalalFood))
            .await
            .unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].id, "place-halal-makkah");
    }
}
