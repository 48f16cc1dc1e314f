//! Normalization of raw query parameters into a [`ProximityQuery`].

use noor_core::{Coordinate, PlaceCategory};
use serde::Deserialize;

use crate::error::ProximityError;

pub const DEFAULT_RADIUS_M: u32 = 5_000;
pub const MIN_RADIUS_M: u32 = 500;
pub const MAX_RADIUS_M: u32 = 20_000;
/// Maximum number of places in one response.
pub const RESULT_LIMIT: usize = 80;

/// Parameters as they arrive on the wire. Every field is optional text so
/// that malformed values can be defaulted instead of rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProximityParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
    #[serde(rename = "type")]
    pub place_type: Option<String>,
}

/// A validated proximity query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    pub origin: Coordinate,
    pub radius_meters: u32,
    pub category: Option<PlaceCategory>,
}

impl ProximityQuery {
    /// Validate and normalize raw parameters.
    ///
    /// - `lat`/`lng` are required finite numbers within WGS84 ranges.
    /// - `radius` defaults to [`DEFAULT_RADIUS_M`] when absent or not a finite
    ///   number, is floored, then clamped to `[MIN_RADIUS_M, MAX_RADIUS_M]`.
    /// - `type` selects a category case-insensitively; anything else means
    ///   no filter.
    ///
    /// # Errors
    ///
    /// Returns [`ProximityError::InvalidQuery`] when the coordinate is
    /// missing or invalid.
    pub fn from_params(params: &ProximityParams) -> Result<Self, ProximityError> {
        let origin = parse_coordinate(params.lat.as_deref(), params.lng.as_deref())?;

        Ok(Self {
            origin,
            radius_meters: normalize_radius(params.radius.as_deref()),
            category: params
                .place_type
                .as_deref()
                .and_then(|value| value.parse().ok()),
        })
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        f64::from(self.radius_meters)
    }

    /// Wire name of the category filter, `"ALL"` when unfiltered.
    #[must_use]
    pub fn type_label(&self) -> &'static str {
        self.category.map_or("ALL", PlaceCategory::as_str)
    }
}

/// Parse a required `lat`/`lng` pair.
///
/// # Errors
///
/// Returns [`ProximityError::InvalidQuery`] if either value is missing, not a
/// finite number, or outside the WGS84 range.
pub fn parse_coordinate(
    lat: Option<&str>,
    lng: Option<&str>,
) -> Result<Coordinate, ProximityError> {
    let (Some(latitude), Some(longitude)) = (parse_finite(lat), parse_finite(lng)) else {
        return Err(ProximityError::InvalidQuery(
            "lat and lng query parameters are required numbers".to_string(),
        ));
    };

    let coordinate = Coordinate::new(latitude, longitude);
    if !coordinate.is_valid() {
        return Err(ProximityError::InvalidQuery(format!(
            "coordinate ({latitude}, {longitude}) is out of range"
        )));
    }

    Ok(coordinate)
}

fn parse_finite(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn normalize_radius(value: Option<&str>) -> u32 {
    let Some(radius) = parse_finite(value) else {
        return DEFAULT_RADIUS_M;
    };

    // Clamped into range first, so the cast cannot truncate.
    radius
        .floor()
        .clamp(f64::from(MIN_RADIUS_M), f64::from(MAX_RADIUS_M)) as u32
}
