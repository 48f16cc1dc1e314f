use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::{distance_meters, Coordinate};
use crate::CoreError;

/// Display name used for external places that carry no usable name tag.
pub const UNNAMED_PLACE: &str = "Unnamed place";

/// Id namespace owned by OpenStreetMap places; verified ids may not use it.
pub const EXTERNAL_ID_PREFIX: &str = "osm-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceCategory {
    Mosque,
    HalalFood,
}

impl PlaceCategory {
    /// Wire and database identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PlaceCategory::Mosque => "MOSQUE",
            PlaceCategory::HalalFood => "HALAL_FOOD",
        }
    }
}

impl std::fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceCategory {
    type Err = CoreError;

    /// Accepts `MOSQUE` / `HALAL_FOOD` in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("MOSQUE") {
            Ok(PlaceCategory::Mosque)
        } else if trimmed.eq_ignore_ascii_case("HALAL_FOOD") {
            Ok(PlaceCategory::HalalFood)
        } else {
            Err(CoreError::InvalidCategory(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceSource {
    /// Curated, verified dataset owned by the application.
    Local,
    /// Open geodata fetched per request.
    External,
}

/// A point of interest normalized for one proximity query.
///
/// `distance_meters` is relative to the query origin and is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    pub id: String,
    pub name: String,
    pub category: PlaceCategory,
    pub location: Coordinate,
    pub address: Option<String>,
    pub description: Option<String>,
    pub verified: bool,
    pub source: PlaceSource,
    pub distance_meters: f64,
}

/// A curated place as held by storage, before it is placed relative to an origin.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedPlace {
    pub id: String,
    pub name: String,
    pub category: PlaceCategory,
    pub location: Coordinate,
    pub address: Option<String>,
    pub description: Option<String>,
}

impl VerifiedPlace {
    /// Build the per-query record, measuring the distance from `origin`.
    #[must_use]
    pub fn to_record(&self, origin: Coordinate) -> PlaceRecord {
        PlaceRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category,
            location: self.location,
            address: self.address.clone(),
            description: self.description.clone(),
            verified: true,
            source: PlaceSource::Local,
            distance_meters: distance_meters(origin, self.location),
        }
    }
}

/// Built-in verified places served when storage cannot be reached.
#[must_use]
pub fn fallback_places() -> Vec<VerifiedPlace> {
    vec![
        VerifiedPlace {
            id: "place-masjid-haram".to_string(),
            name: "Masjid al-Haram".to_string(),
            category: PlaceCategory::Mosque,
            location: Coordinate::new(21.4225, 39.8262),
            address: Some("Makkah, Saudi Arabia".to_string()),
            description: Some("Central mosque in Makkah.".to_string()),
        },
        VerifiedPlace {
            id: "place-madinah-prophet-mosque".to_string(),
            name: "Al-Masjid an-Nabawi".to_string(),
            category: PlaceCategory::Mosque,
            location: Coordinate::new(24.4672, 39.6111),
            address: Some("Madinah, Saudi Arabia".to_string()),
            description: Some("The Prophet's Mosque in Madinah.".to_string()),
        },
        VerifiedPlace {
            id: "place-halal-makkah".to_string(),
            name: "Makkah Halal Kitchen".to_string(),
            category: PlaceCategory::HalalFood,
            location: Coordinate::new(21.4283, 39.8274),
            address: Some("Ajyad, Makkah".to_string()),
            description: Some("Verified halal dining option.".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!(
            "MOSQUE".parse::<PlaceCategory>().unwrap(),
            PlaceCategory::Mosque
        );
        assert_eq!(
            "halal_food".parse::<PlaceCategory>().unwrap(),
            PlaceCategory::HalalFood
        );
        assert_eq!(
            " Mosque ".parse::<PlaceCategory>().unwrap(),
            PlaceCategory::Mosque
        );
    }

    #[test]
    fn category_rejects_unknown_values() {
        let err = "CHURCH".parse::<PlaceCategory>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidCategory(ref v) if v == "CHURCH"));
        assert!("".parse::<PlaceCategory>().is_err());
    }

    #[test]
    fn category_display_matches_wire_name() {
        assert_eq!(PlaceCategory::Mosque.to_string(), "MOSQUE");
        assert_eq!(PlaceCategory::HalalFood.to_string(), "HALAL_FOOD");
    }

    #[test]
    fn record_serializes_with_camel_case_fields() {
        let record = fallback_places()[0].to_record(Coordinate::new(21.4225, 39.8262));
        let json = serde_json::to_value(&record).expect("serialize PlaceRecord");
        assert_eq!(json["category"], "MOSQUE");
        assert_eq!(json["source"], "LOCAL");
        assert_eq!(json["verified"], true);
        assert_eq!(json["distanceMeters"], 0.0);
        assert_eq!(json["location"]["latitude"], 21.4225);
    }

    #[test]
    fn verified_place_becomes_local_record() {
        let place = &fallback_places()[1];
        let record = place.to_record(Coordinate::new(21.4225, 39.8262));
        assert_eq!(record.source, PlaceSource::Local);
        assert!(record.verified);
        assert!(record.distance_meters > 300_000.0);
    }

    #[test]
    fn fallback_ids_are_unique() {
        let places = fallback_places();
        let mut ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), places.len());
    }
}
