//! Overpass QL query text for halal places around a point.

use noor_core::Coordinate;

/// Tag filters selecting mosques and halal food outlets.
const SELECTORS: [&str; 3] = [
    r#"["amenity"="place_of_worship"]["religion"="muslim"]"#,
    r#"["shop"="halal"]"#,
    r#"["cuisine"~"halal",i]"#,
];

/// Build the interpreter query for every mosque and halal food element
/// within `radius_meters` of `origin`.
///
/// Each selector is issued for nodes and ways; ways report their `center`
/// so they can be placed on a map. The result is capped server-side at
/// `max_elements`.
#[must_use]
pub fn build_query(
    origin: Coordinate,
    radius_meters: f64,
    timeout_secs: u64,
    max_elements: u32,
) -> String {
    let around = format!(
        "(around:{radius_meters},{lat},{lng})",
        lat = origin.latitude,
        lng = origin.longitude
    );

    let mut lines = Vec::with_capacity(SELECTORS.len() * 2);
    for selector in SELECTORS {
        for element_type in ["node", "way"] {
            lines.push(format!("  {element_type}{selector}{around};"));
        }
    }

    format!(
        "[out:json][timeout:{timeout_secs}];\n(\n{body}\n);\nout center {max_elements};",
        body = lines.join("\n")
    )
}
