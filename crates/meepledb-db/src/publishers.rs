//! Database operations for the `publishers` table.

use sqlx::PgPool;

use crate::DbError;

/// Finds a publisher by name or creates it, returning its stable id.
///
/// Same atomic upsert shape as mechanic resolution; the `lower(name)` unique
/// index is the natural key.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails.
pub async fn find_or_create_publisher(pool: &PgPool, name: &str) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO publishers (name) VALUES ($1) \
         ON CONFLICT ((lower(name))) DO UPDATE SET name = publishers.name \
         RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns a publisher's name by id, or `None` when no id was linked.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_publisher_name(
    pool: &PgPool,
    publisher_id: Option<i64>,
) -> Result<Option<String>, DbError> {
    let Some(publisher_id) = publisher_id else {
        return Ok(None);
    };

    let name = sqlx::query_scalar::<_, String>("SELECT name FROM publishers WHERE id = $1")
        .bind(publisher_id)
        .fetch_optional(pool)
        .await?;

    Ok(name)
}
