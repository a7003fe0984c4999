//! Database operations for the `games` table and its mechanic linkage.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row and write types
// ---------------------------------------------------------------------------

/// A row from the `games` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GameRow {
    pub id: i64,
    pub public_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub play_time: String,
    pub game_type: String,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    pub suggested_age: Option<String>,
    pub publisher_id: Option<i64>,
    pub main_image_url: Option<String>,
    pub gallery_image_urls: Vec<String>,
    /// `NULL` for records created by hand through the admin surface.
    pub source_url: Option<String>,
    pub is_coming_soon: bool,
    pub is_for_sale: bool,
    pub sale_price: Option<Decimal>,
    pub sale_condition: Option<String>,
    pub is_expansion: bool,
    pub parent_game_id: Option<i64>,
    pub location_room: Option<String>,
    pub location_shelf: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The write payload for an import upsert.
///
/// Enum-typed columns are carried as their display literals; callers build
/// them from the core enums so only closed-set values ever reach a bind.
#[derive(Debug, Clone)]
pub struct GameUpsert {
    pub title: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub play_time: String,
    pub game_type: String,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    pub suggested_age: Option<String>,
    pub publisher_id: Option<i64>,
    pub main_image_url: Option<String>,
    pub gallery_image_urls: Vec<String>,
    pub source_url: String,
    pub is_coming_soon: bool,
    pub is_for_sale: bool,
    pub sale_price: Option<Decimal>,
    pub sale_condition: Option<String>,
    pub is_expansion: bool,
    pub parent_game_id: Option<i64>,
    pub location_room: Option<String>,
    pub location_shelf: Option<String>,
}

const GAME_COLUMNS: &str = "id, public_id, title, description, difficulty, play_time, game_type, \
     min_players, max_players, suggested_age, publisher_id, main_image_url, gallery_image_urls, \
     source_url, is_coming_soon, is_for_sale, sale_price, sale_condition, is_expansion, \
     parent_game_id, location_room, location_shelf, created_at, updated_at";

// ---------------------------------------------------------------------------
// games operations
// ---------------------------------------------------------------------------

/// Upserts a game keyed on `source_url` and replaces its mechanic links.
///
/// This is the import idempotency boundary: re-importing the same source URL
/// updates the existing row in place and never creates a duplicate. The row
/// write and the link replacement run in one transaction, so a failure at
/// any write step aborts without partial linkage left dangling.
///
/// Returns the full upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement in the transaction fails.
pub async fn upsert_game_with_links(
    pool: &PgPool,
    game: &GameUpsert,
    mechanic_ids: &[i64],
) -> Result<GameRow, DbError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, GameRow>(&format!(
        "INSERT INTO games \
             (title, description, difficulty, play_time, game_type, \
              min_players, max_players, suggested_age, publisher_id, main_image_url, \
              gallery_image_urls, source_url, is_coming_soon, is_for_sale, sale_price, \
              sale_condition, is_expansion, parent_game_id, location_room, location_shelf) \
         VALUES ($1, $2, $3, $4, $5, \
                 $6, $7, $8, $9, $10, \
                 $11, $12, $13, $14, $15, \
                 $16, $17, $18, $19, $20) \
         ON CONFLICT (source_url) WHERE source_url IS NOT NULL DO UPDATE SET \
             title              = EXCLUDED.title, \
             description        = EXCLUDED.description, \
             difficulty         = EXCLUDED.difficulty, \
             play_time          = EXCLUDED.play_time, \
             game_type          = EXCLUDED.game_type, \
             min_players        = EXCLUDED.min_players, \
             max_players        = EXCLUDED.max_players, \
             suggested_age      = EXCLUDED.suggested_age, \
             publisher_id       = EXCLUDED.publisher_id, \
             main_image_url     = EXCLUDED.main_image_url, \
             gallery_image_urls = EXCLUDED.gallery_image_urls, \
             is_coming_soon     = EXCLUDED.is_coming_soon, \
             is_for_sale        = EXCLUDED.is_for_sale, \
             sale_price         = EXCLUDED.sale_price, \
             sale_condition     = EXCLUDED.sale_condition, \
             is_expansion       = EXCLUDED.is_expansion, \
             parent_game_id     = EXCLUDED.parent_game_id, \
             location_room      = EXCLUDED.location_room, \
             location_shelf     = EXCLUDED.location_shelf, \
             updated_at         = NOW() \
         RETURNING {GAME_COLUMNS}"
    ))
    .bind(&game.title)
    .bind(&game.description)
    .bind(&game.difficulty)
    .bind(&game.play_time)
    .bind(&game.game_type)
    .bind(game.min_players)
    .bind(game.max_players)
    .bind(&game.suggested_age)
    .bind(game.publisher_id)
    .bind(&game.main_image_url)
    .bind(&game.gallery_image_urls)
    .bind(&game.source_url)
    .bind(game.is_coming_soon)
    .bind(game.is_for_sale)
    .bind(game.sale_price)
    .bind(&game.sale_condition)
    .bind(game.is_expansion)
    .bind(game.parent_game_id)
    .bind(&game.location_room)
    .bind(&game.location_shelf)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM game_mechanics WHERE game_id = $1")
        .bind(row.id)
        .execute(&mut *tx)
        .await?;

    for mechanic_id in mechanic_ids {
        sqlx::query(
            "INSERT INTO game_mechanics (game_id, mechanic_id) \
             VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(row.id)
        .bind(mechanic_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(row)
}

/// Returns the game imported from `source_url`, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_game_by_source_url(
    pool: &PgPool,
    source_url: &str,
) -> Result<Option<GameRow>, DbError> {
    let row = sqlx::query_as::<_, GameRow>(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE source_url = $1"
    ))
    .bind(source_url)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns a single game by its public id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_game_by_public_id(
    pool: &PgPool,
    public_id: Uuid,
) -> Result<Option<GameRow>, DbError> {
    let row = sqlx::query_as::<_, GameRow>(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE public_id = $1"
    ))
    .bind(public_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Resolves a public id to the internal row id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_game_id_by_public_id(
    pool: &PgPool,
    public_id: Uuid,
) -> Result<Option<i64>, DbError> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM games WHERE public_id = $1")
        .bind(public_id)
        .fetch_optional(pool)
        .await?;

    Ok(id)
}

/// Returns games ordered by title, up to `limit` rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_games(pool: &PgPool, limit: i64) -> Result<Vec<GameRow>, DbError> {
    let rows = sqlx::query_as::<_, GameRow>(&format!(
        "SELECT {GAME_COLUMNS} FROM games ORDER BY title LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the names of the mechanics linked to a game, ordered by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_game_mechanic_names(pool: &PgPool, game_id: i64) -> Result<Vec<String>, DbError> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT m.name \
         FROM mechanics m \
         JOIN game_mechanics gm ON gm.mechanic_id = m.id \
         WHERE gm.game_id = $1 \
         ORDER BY m.name",
    )
    .bind(game_id)
    .fetch_all(pool)
    .await?;

    Ok(names)
}
