//! Write operations for the `places` table.

use sqlx::PgPool;

use super::types::NewPlace;

/// Insert new places and refresh existing ones, keyed by `id`.
///
/// Returns `(new_count, updated_count)`. The whole batch is a single
/// `INSERT … SELECT * FROM UNNEST(…) ON CONFLICT` statement, so it is applied
/// atomically in one round-trip.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails, including when a coordinate
/// violates the table's range checks.
pub async fn upsert_places(pool: &PgPool, places: &[NewPlace]) -> Result<(u64, u64), sqlx::Error> {
    if places.is_empty() {
        return Ok((0, 0));
    }

    let mut ids: Vec<String> = Vec::with_capacity(places.len());
    let mut names: Vec<String> = Vec::with_capacity(places.len());
    let mut place_types: Vec<String> = Vec::with_capacity(places.len());
    let mut latitudes: Vec<f64> = Vec::with_capacity(places.len());
    let mut longitudes: Vec<f64> = Vec::with_capacity(places.len());
    let mut addresses: Vec<Option<String>> = Vec::with_capacity(places.len());
    let mut descriptions: Vec<Option<String>> = Vec::with_capacity(places.len());
    let mut verified: Vec<bool> = Vec::with_capacity(places.len());

    for place in places {
        ids.push(place.id.clone());
        names.push(place.name.clone());
        place_types.push(place.category.as_str().to_string());
        latitudes.push(place.latitude);
        longitudes.push(place.longitude);
        addresses.push(place.address.clone());
        descriptions.push(place.description.clone());
        verified.push(place.is_verified);
    }

    let rows: Vec<bool> = sqlx::query_scalar::<_, bool>(
        "INSERT INTO places \
             (id, name, place_type, latitude, longitude, address, description, is_verified) \
         SELECT * FROM UNNEST(\
              $1::text[], $2::text[], $3::text[], $4::float8[], $5::float8[], \
              $6::text[], $7::text[], $8::bool[]) \
         ON CONFLICT (id) DO UPDATE SET \
             name        = EXCLUDED.name, \
             place_type  = EXCLUDED.place_type, \
             latitude    = EXCLUDED.latitude, \
             longitude   = EXCLUDED.longitude, \
             address     = EXCLUDED.address, \
             description = EXCLUDED.description, \
             is_verified = EXCLUDED.is_verified, \
             updated_at  = NOW() \
         RETURNING (xmax = 0) AS is_new",
    )
    .bind(&ids)
    .bind(&names)
    .bind(&place_types)
    .bind(&latitudes)
    .bind(&longitudes)
    .bind(&addresses)
    .bind(&descriptions)
    .bind(&verified)
    .fetch_all(pool)
    .await?;

    let new_count = rows.iter().filter(|&&is_new| is_new).count() as u64;
    let updated_count = rows.len() as u64 - new_count;

    Ok((new_count, updated_count))
}
