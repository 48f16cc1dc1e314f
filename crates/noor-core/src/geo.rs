//! Spherical-earth geometry: haversine distance and the Qibla bearing.

use serde::{Deserialize, Serialize};

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Location of the Kaaba in Makkah.
pub const KAABA: Coordinate = Coordinate {
    latitude: 21.4225,
    longitude: 39.8262,
};

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `true` when both components are finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

/// Great-circle distance between two coordinates in meters (haversine).
///
/// Inputs are not range-checked. The intermediate term is clamped into
/// `[0, 1]` so antipodal points yield `π·R` instead of NaN.
///
/// ```
/// use noor_core::{distance_meters, Coordinate};
///
/// let makkah = Coordinate::new(21.4225, 39.8262);
/// let madinah = Coordinate::new(24.4672, 39.6111);
/// let d = distance_meters(makkah, madinah);
/// assert!((d - 339_000.0).abs() < 2_000.0);
/// ```
#[must_use]
pub fn distance_meters(from: Coordinate, to: Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Initial great-circle bearing from `from` toward the Kaaba, in degrees
/// clockwise from true north within `[0, 360)`.
#[must_use]
pub fn qibla_bearing(from: Coordinate) -> f64 {
    let lat = from.latitude.to_radians();
    let kaaba_lat = KAABA.latitude.to_radians();
    let delta_lon = (KAABA.longitude - from.longitude).to_radians();

    let y = delta_lon.sin();
    let x = lat.cos() * kaaba_lat.tan() - lat.sin() * delta_lon.cos();

    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}
