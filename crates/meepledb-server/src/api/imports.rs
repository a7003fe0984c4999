//! The import trigger endpoint.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use meepledb_core::ImportRequest;
use meepledb_import::{run_import, ImportError};

use super::{import_error_status, AppState, FailureBody, GamePayload};

#[derive(Debug, Serialize)]
struct ImportSuccess {
    success: bool,
    game: GamePayload,
}

/// `POST /api/v1/imports` — runs the catalog import pipeline synchronously
/// and returns the persisted record, or a typed failure with a status chosen
/// per failure kind. Nothing is queued or retried.
pub(super) async fn trigger_import(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Response {
    match run_import(
        &state.pool,
        &state.scraper,
        state.extractor.as_ref(),
        &request,
    )
    .await
    {
        Ok(imported) => {
            let game = GamePayload::from_parts(imported.game, imported.mechanics, imported.publisher);
            (
                StatusCode::OK,
                Json(ImportSuccess {
                    success: true,
                    game,
                }),
            )
                .into_response()
        }
        Err(error) => failure_response(&error),
    }
}

fn failure_response(error: &ImportError) -> Response {
    let status = import_error_status(error);
    tracing::warn!(error = %error, status = status.as_u16(), "catalog import failed");

    let mut response = (status, Json(FailureBody::new(error.to_string()))).into_response();

    // Propagate the upstream's retry hint so the admin UI can surface it.
    if let ImportError::UpstreamBusy {
        retry_after_secs: Some(secs),
    } = error
    {
        if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
    }

    response
}
