use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, AppState};
use crate::api::models::RoundLabelsResponse;
use crate::database;
use crate::domain::derive_round_labels;
use crate::errors::CoreError;
use crate::services::views;

pub async fn get_tournament_rounds(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<i64>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let tournament = match database::tournaments::find_by_id(&conn, tournament_id) {
        Ok(Some(tournament)) => tournament,
        Ok(None) => return error_response(CoreError::NotFound("tournament")),
        Err(e) => return error_response(CoreError::Store(e)),
    };

    let rounds = derive_round_labels(tournament.metadata.as_ref());
    Json(RoundLabelsResponse {
        tournament_id: tournament.id,
        rounds,
    })
    .into_response()
}

pub async fn get_round_view(
    State(state): State<Arc<AppState>>,
    Path((tournament_id, round)): Path<(i64, String)>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match views::build_round_view(&conn, tournament_id, &round) {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_match_view(
    State(state): State<Arc<AppState>>,
    Path((tournament_id, round, match_id)): Path<(i64, String, i64)>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match views::build_match_view(&conn, tournament_id, &round, match_id) {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(e),
    }
}
