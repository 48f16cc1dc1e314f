use noor_core::VerifiedPlace;
use sqlx::PgPool;

use crate::places::{upsert_places, NewPlace};
use crate::DbError;

/// Upsert curated places into the database as verified rows.
///
/// Returns `(new_count, updated_count)`. Places are written in one
/// statement; if any row is rejected the whole batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn seed_places(pool: &PgPool, places: &[VerifiedPlace]) -> Result<(u64, u64), DbError> {
    let rows: Vec<NewPlace> = places.iter().map(NewPlace::from).collect();
    let counts = upsert_places(pool, &rows).await?;
    tracing::info!(
        inserted = counts.0,
        updated = counts.1,
        "seeded verified places"
    );
    Ok(counts)
}
