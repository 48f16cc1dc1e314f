//! Merge and de-duplication of local and external place results.

use std::collections::HashMap;

use crate::places::{PlaceCategory, PlaceRecord, PlaceSource};

/// Near-duplicate identity of a place: lowercased name, coordinates rounded
/// to five decimal places (about one meter), and category.
///
/// The same place listed under different names is not matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupeKey {
    name: String,
    latitude: String,
    longitude: String,
    category: PlaceCategory,
}

impl DedupeKey {
    #[must_use]
    pub fn of(place: &PlaceRecord) -> Self {
        Self {
            name: place.name.to_lowercase(),
            latitude: format!("{:.5}", place.location.latitude),
            longitude: format!("{:.5}", place.location.longitude),
            category: place.category,
        }
    }
}

/// Combine both sources into one ranked list.
///
/// Records are considered local first, then external. Anything outside
/// `radius_meters` or not matching `category` is dropped. When two records
/// share a [`DedupeKey`] the first one wins, except that a local record
/// replaces an external one already kept (in the external record's slot).
/// The survivors are sorted by ascending distance (stable) and truncated to
/// `limit`.
#[must_use]
pub fn merge_places(
    local: Vec<PlaceRecord>,
    external: Vec<PlaceRecord>,
    radius_meters: f64,
    category: Option<PlaceCategory>,
    limit: usize,
) -> Vec<PlaceRecord> {
    let mut slots: HashMap<DedupeKey, usize> = HashMap::new();
    let mut kept: Vec<PlaceRecord> = Vec::with_capacity(local.len() + external.len());

    for place in local.into_iter().chain(external) {
        if category.is_some_and(|wanted| wanted != place.category) {
            continue;
        }
        if place.distance_meters.is_nan() || place.distance_meters > radius_meters {
            continue;
        }

        let key = DedupeKey::of(&place);
        if let Some(&slot) = slots.get(&key) {
            if kept[slot].source == PlaceSource::External && place.source == PlaceSource::Local {
                kept[slot] = place;
            }
        } else {
            slots.insert(key, kept.len());
            kept.push(place);
        }
    }

    kept.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    kept.truncate(limit);
    kept
}
