mod games;
mod imports;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use meepledb_db::{get_publisher_name, list_game_mechanic_names, DbError, GameRow};
use meepledb_extractor::ExtractionClient;
use meepledb_import::ImportError;
use meepledb_scraper::ScrapeClient;

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub scraper: Arc<ScrapeClient>,
    pub extractor: Arc<ExtractionClient>,
}

/// A catalog record with its resolved mechanic and publisher names, as
/// served to the admin UI.
#[derive(Debug, Serialize)]
pub struct GamePayload {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub play_time: String,
    pub game_type: String,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    pub suggested_age: Option<String>,
    pub publisher: Option<String>,
    pub mechanics: Vec<String>,
    pub main_image_url: Option<String>,
    pub gallery_image_urls: Vec<String>,
    pub source_url: Option<String>,
    pub is_coming_soon: bool,
    pub is_for_sale: bool,
    pub sale_price: Option<Decimal>,
    pub sale_condition: Option<String>,
    pub is_expansion: bool,
    pub location_room: Option<String>,
    pub location_shelf: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GamePayload {
    pub(super) fn from_parts(
        game: GameRow,
        mechanics: Vec<String>,
        publisher: Option<String>,
    ) -> Self {
        Self {
            id: game.public_id,
            title: game.title,
            description: game.description,
            difficulty: game.difficulty,
            play_time: game.play_time,
            game_type: game.game_type,
            min_players: game.min_players,
            max_players: game.max_players,
            suggested_age: game.suggested_age,
            publisher,
            mechanics,
            main_image_url: game.main_image_url,
            gallery_image_urls: game.gallery_image_urls,
            source_url: game.source_url,
            is_coming_soon: game.is_coming_soon,
            is_for_sale: game.is_for_sale,
            sale_price: game.sale_price,
            sale_condition: game.sale_condition,
            is_expansion: game.is_expansion,
            location_room: game.location_room,
            location_shelf: game.location_shelf,
            created_at: game.created_at,
            updated_at: game.updated_at,
        }
    }
}

/// Loads the relation names for a row and assembles the payload.
pub(super) async fn load_game_payload(
    pool: &PgPool,
    game: GameRow,
) -> Result<GamePayload, DbError> {
    let mechanics = list_game_mechanic_names(pool, game.id).await?;
    let publisher = get_publisher_name(pool, game.publisher_id).await?;
    Ok(GamePayload::from_parts(game, mechanics, publisher))
}

/// Failure body shared by every endpoint: `{"success":false,"error":...}`.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub success: bool,
    pub error: String,
}

impl FailureBody {
    pub(super) fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

/// Maps a pipeline failure onto its HTTP status.
pub(super) fn import_error_status(error: &ImportError) -> StatusCode {
    match error {
        ImportError::InvalidUrl { .. }
        | ImportError::NoContent { .. }
        | ImportError::NoTitleFound => StatusCode::BAD_REQUEST,
        ImportError::ScrapeUnavailable { .. } | ImportError::ContentMismatch { .. } => {
            StatusCode::BAD_GATEWAY
        }
        ImportError::UpstreamBusy { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ImportError::ExtractionFailed { .. } | ImportError::Persistence(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub(super) fn normalize_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(50).clamp(1, 200)
}

pub(super) fn db_failure(error: &DbError) -> (StatusCode, Json<FailureBody>) {
    tracing::error!(error = %error, "database query failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FailureBody::new("database query failed")),
    )
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/imports", post(imports::trigger_import))
        .route("/api/v1/games", get(games::list_games))
        .route("/api/v1/games/{public_id}", get(games::get_game))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match meepledb_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}
