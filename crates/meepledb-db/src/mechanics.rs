//! Database operations for the `mechanics` table.

use sqlx::PgPool;

use crate::DbError;

/// Finds a mechanic by name or creates it, returning its stable id.
///
/// The name is the natural key, case-insensitively: a single
/// `INSERT ... ON CONFLICT` against the `lower(name)` unique index makes the
/// find-or-create atomic, so concurrent imports can never create two
/// mechanics differing only by case. The first spelling written wins.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails.
pub async fn find_or_create_mechanic(pool: &PgPool, name: &str) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO mechanics (name) VALUES ($1) \
         ON CONFLICT ((lower(name))) DO UPDATE SET name = mechanics.name \
         RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
