//! Read operations for the `places` table.

use noor_core::{PlaceCategory, VerifiedPlace};
use sqlx::PgPool;

use super::types::PlaceRow;

/// List every verified place, optionally restricted to one category.
///
/// Rows whose `place_type` is not a known category are skipped with a
/// warning. Results are ordered by `id` so repeated calls are stable.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_verified_places(
    pool: &PgPool,
    category: Option<PlaceCategory>,
) -> Result<Vec<VerifiedPlace>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PlaceRow>(
        "SELECT id, name, place_type, latitude, longitude, address, description, \
                is_verified, created_at, updated_at \
         FROM places \
         WHERE is_verified = TRUE \
           AND ($1::text IS NULL OR place_type = $1) \
         ORDER BY id",
    )
    .bind(category.map(PlaceCategory::as_str))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .filter_map(|row| match row.to_verified_place() {
            Ok(place) => Some(place),
            Err(e) => {
                tracing::warn!(id = %row.id, error = %e, "skipping place with unknown type");
                None
            }
        })
        .collect())
}

/// Count verified places.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn count_verified_places(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM places WHERE is_verified = TRUE")
        .fetch_one(pool)
        .await
}
