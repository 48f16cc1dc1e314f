//! Domain types and pure logic for the Noor halal-places service.
//!
//! Everything in this crate is synchronous and I/O free apart from the
//! environment and YAML loaders, so the proximity pipeline can be tested
//! without a database or network.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod merge;
pub mod places;
pub mod places_file;

use thiserror::Error;

pub use app_config::{AppConfig, DEFAULT_OVERPASS_TIMEOUT_SECS, DEFAULT_OVERPASS_URL};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_meters, qibla_bearing, Coordinate, EARTH_RADIUS_M, KAABA};
pub use merge::{merge_places, DedupeKey};
pub use places::{
    fallback_places, PlaceCategory, PlaceRecord, PlaceSource, VerifiedPlace, EXTERNAL_ID_PREFIX,
    UNNAMED_PLACE,
};
pub use places_file::{load_places_file, PlaceEntry, PlacesFile};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid place category: {0}")]
    InvalidCategory(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read places file {path}: {source}")]
    PlacesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse places file: {0}")]
    PlacesFileParse(#[from] serde_yaml::Error),

    #[error("places file validation failed: {0}")]
    Validation(String),
}
