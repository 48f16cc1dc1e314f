//! Normalization from raw Overpass elements to [`noor_core::PlaceRecord`].
//!
//! Tags are an open-ended string map; every field has an explicit fallback so
//! the mapping is total. The only element that is rejected is one without a
//! usable coordinate, because it cannot be ranked by distance.

use noor_core::{
    distance_meters, Coordinate, PlaceCategory, PlaceRecord, PlaceSource, EXTERNAL_ID_PREFIX,
    UNNAMED_PLACE,
};

use crate::types::OverpassElement;

/// Address tags in display order.
const ADDRESS_TAGS: [&str; 4] = [
    "addr:street",
    "addr:housenumber",
    "addr:city",
    "addr:postcode",
];

/// Normalizes one element relative to the query origin.
///
/// Returns `None` for elements with no resolvable coordinate.
#[must_use]
pub fn normalize_element(element: &OverpassElement, origin: Coordinate) -> Option<PlaceRecord> {
    let location = element.coordinate()?;

    Some(PlaceRecord {
        id: external_id(element),
        name: place_name(element),
        category: place_category(element),
        location,
        address: place_address(element),
        description: element
            .tag("cuisine")
            .map(|cuisine| format!("Cuisine: {cuisine}")),
        verified: false,
        source: PlaceSource::External,
        distance_meters: distance_meters(origin, location),
    })
}

/// Normalizes a batch, silently skipping unplaceable elements.
#[must_use]
pub fn normalize_elements(elements: &[OverpassElement], origin: Coordinate) -> Vec<PlaceRecord> {
    let places: Vec<PlaceRecord> = elements
        .iter()
        .filter_map(|element| normalize_element(element, origin))
        .collect();

    let dropped = elements.len() - places.len();
    if dropped > 0 {
        tracing::debug!(dropped, "skipped Overpass elements without coordinates");
    }

    places
}

/// `osm-<type>-<id>`; node and way ids overlap in OSM, so the type is part
/// of the identity.
fn external_id(element: &OverpassElement) -> String {
    match element.element_type.as_deref() {
        Some(kind) if !kind.is_empty() => format!("{EXTERNAL_ID_PREFIX}{kind}-{}", element.id),
        _ => format!("{EXTERNAL_ID_PREFIX}{}", element.id),
    }
}

fn place_category(element: &OverpassElement) -> PlaceCategory {
    let is_mosque = element.tag("amenity") == Some("place_of_worship")
        && element.tag("religion") == Some("muslim");

    if is_mosque {
        PlaceCategory::Mosque
    } else {
        PlaceCategory::HalalFood
    }
}

fn place_name(element: &OverpassElement) -> String {
    element
        .tag("name")
        .or_else(|| element.tag("name:en"))
        .unwrap_or(UNNAMED_PLACE)
        .to_string()
}

fn place_address(element: &OverpassElement) -> Option<String> {
    let parts: Vec<&str> = ADDRESS_TAGS
        .iter()
        .filter_map(|key| element.tag(key))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
