use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::places::{PlaceCategory, VerifiedPlace, EXTERNAL_ID_PREFIX};
use crate::ConfigError;

/// One curated entry in `config/places.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceEntry {
    pub id: String,
    pub name: String,
    pub category: PlaceCategory,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub description: Option<String>,
}

impl PlaceEntry {
    #[must_use]
    pub fn to_verified_place(&self) -> VerifiedPlace {
        VerifiedPlace {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            category: self.category,
            location: Coordinate::new(self.latitude, self.longitude),
            address: self.address.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlacesFile {
    pub places: Vec<PlaceEntry>,
}

impl PlacesFile {
    #[must_use]
    pub fn verified_places(&self) -> Vec<VerifiedPlace> {
        self.places
            .iter()
            .map(PlaceEntry::to_verified_place)
            .collect()
    }
}

/// Load and validate the verified places list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_places_file(path: &Path) -> Result<PlacesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PlacesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_places_file(&content)
}

fn parse_places_file(content: &str) -> Result<PlacesFile, ConfigError> {
    let places_file: PlacesFile = serde_yaml::from_str(content)?;
    validate_places(&places_file)?;
    Ok(places_file)
}

fn validate_places(places_file: &PlacesFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for place in &places_file.places {
        let id = place.id.trim();
        if id.is_empty() {
            return Err(ConfigError::Validation(
                "place id must be non-empty".to_string(),
            ));
        }

        if id.starts_with(EXTERNAL_ID_PREFIX) {
            return Err(ConfigError::Validation(format!(
                "place id '{id}' uses the reserved '{EXTERNAL_ID_PREFIX}' prefix"
            )));
        }

        if place.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "place '{id}' must have a non-empty name"
            )));
        }

        if !Coordinate::new(place.latitude, place.longitude).is_valid() {
            return Err(ConfigError::Validation(format!(
                "place '{id}' has out-of-range coordinates ({}, {})",
                place.latitude, place.longitude
            )));
        }

        if !seen_ids.insert(id.to_string()) {
            return Err(ConfigError::Validation(format!(
                "duplicate place id: '{id}'"
            )));
        }
    }

    Ok(())
}
