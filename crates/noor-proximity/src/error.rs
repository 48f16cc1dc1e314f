use thiserror::Error;

/// Errors returned to callers of the proximity facade.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProximityError {
    #[error("{0}")]
    InvalidQuery(String),
}

/// Failures of a single place source.
///
/// Never crosses the facade: [`crate::LocalPlaces`] recovers with seed data
/// and [`crate::ExternalPlaces`] recovers with an empty list.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("verified place store unavailable: {0}")]
    LocalUnavailable(String),

    #[error("external place source unavailable: {0}")]
    ExternalUnavailable(String),
}
