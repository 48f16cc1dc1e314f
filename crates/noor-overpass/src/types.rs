//! Overpass JSON response types (`[out:json]` with `out center`).
//!
//! Nodes carry `lat`/`lon` directly. Ways and relations carry a `center`
//! object instead, and only when the query asks for `out center`. Elements
//! may omit `tags` entirely; that is modelled as an empty map.

use std::collections::BTreeMap;

use serde::Deserialize;

use noor_core::Coordinate;

/// Top-level interpreter response.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// A single node, way, or relation.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    /// `"node"`, `"way"` or `"relation"`. Absent in some mirrors' output.
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// Point geometry if present, otherwise the computed center.
    ///
    /// Returns `None` when neither is available or the values are not finite.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        let point = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon),
            _ => {
                let center = self.center?;
                Coordinate::new(center.lat, center.lon)
            }
        };

        (point.latitude.is_finite() && point.longitude.is_finite()).then_some(point)
    }

    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}
