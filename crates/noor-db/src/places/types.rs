//! Row types for the `places` table.

use chrono::{DateTime, Utc};
use noor_core::{Coordinate, CoreError, PlaceCategory, VerifiedPlace};

/// Input record for inserting/upserting a place.
#[derive(Debug, Clone)]
pub struct NewPlace {
    pub id: String,
    pub name: String,
    pub category: PlaceCategory,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub description: Option<String>,
    pub is_verified: bool,
}

impl From<&VerifiedPlace> for NewPlace {
    fn from(place: &VerifiedPlace) -> Self {
        Self {
            id: place.id.clone(),
            name: place.name.clone(),
            category: place.category,
            latitude: place.location.latitude,
            longitude: place.location.longitude,
            address: place.address.clone(),
            description: place.description.clone(),
            is_verified: true,
        }
    }
}

/// A row from the `places` table.
///
/// `place_type` stays a string here; rows written by other tools may carry a
/// value this build does not know.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlaceRow {
    pub id: String,
    pub name: String,
    pub place_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub description: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlaceRow {
    /// Convert to the domain type.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCategory`] if `place_type` is not a known
    /// category.
    pub fn to_verified_place(&self) -> Result<VerifiedPlace, CoreError> {
        Ok(VerifiedPlace {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.place_type.parse()?,
            location: Coordinate::new(self.latitude, self.longitude),
            address: self.address.clone(),
            description: self.description.clone(),
        })
    }
}
