//! Read surface over imported catalog records.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use meepledb_db::{get_game_by_public_id, list_games as db_list_games};

use super::{db_failure, load_game_payload, normalize_limit, AppState, FailureBody, GamePayload};

#[derive(Debug, Deserialize)]
pub(super) struct ListParams {
    limit: Option<i64>,
}

#[derive(Debug, Serialize)]
struct GamesList {
    games: Vec<GamePayload>,
}

/// `GET /api/v1/games` — games ordered by title, `limit` clamped to 1..=200.
pub(super) async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let limit = normalize_limit(params.limit);

    let rows = match db_list_games(&state.pool, limit).await {
        Ok(rows) => rows,
        Err(e) => return db_failure(&e).into_response(),
    };

    let mut games = Vec::with_capacity(rows.len());
    for row in rows {
        match load_game_payload(&state.pool, row).await {
            Ok(payload) => games.push(payload),
            Err(e) => return db_failure(&e).into_response(),
        }
    }

    (StatusCode::OK, Json(GamesList { games })).into_response()
}

/// `GET /api/v1/games/{public_id}` — a single game by public id.
pub(super) async fn get_game(
    State(state): State<AppState>,
    Path(public_id): Path<Uuid>,
) -> Response {
    let row = match get_game_by_public_id(&state.pool, public_id).await {
        Ok(row) => row,
        Err(e) => return db_failure(&e).into_response(),
    };

    let Some(row) = row else {
        return (
            StatusCode::NOT_FOUND,
            Json(FailureBody::new("game not found")),
        )
            .into_response();
    };

    match load_game_payload(&state.pool, row).await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(e) => db_failure(&e).into_response(),
    }
}
