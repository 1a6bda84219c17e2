use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, player_id_from_headers, AppState};
use crate::api::models::{JoinResponse, ScoreUpdateRequest, ScoreUpdateResponse};
use crate::database;
use crate::errors::CoreError;
use crate::push::PushMessage;
use crate::services::ledger::{self, ScoreAction};
use crate::services::{referee, views};

pub async fn join_as_referee(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<i64>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(player_id) = player_id_from_headers(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match referee::join_as_referee(&conn, tournament_id, player_id) {
        Ok(()) => Json(JoinResponse { access: true }).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_referee_match_view(
    State(state): State<Arc<AppState>>,
    Path((tournament_id, round, match_id)): Path<(i64, String, i64)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(player_id) = player_id_from_headers(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    if let Err(e) = referee::ensure_referee(&conn, tournament_id, player_id) {
        return error_response(e);
    }

    match views::build_referee_match_view(&conn, tournament_id, &round, match_id) {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_match_score(
    State(state): State<Arc<AppState>>,
    Path((tournament_id, round, match_id)): Path<(i64, String, i64)>,
    headers: HeaderMap,
    Json(body): Json<ScoreUpdateRequest>,
) -> impl IntoResponse {
    let Some(player_id) = player_id_from_headers(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    if let Err(e) = referee::ensure_referee(&conn, tournament_id, player_id) {
        return error_response(e);
    }

    // Mutations are addressed by the same triple as reads.
    let match_row = match database::matches::find_scoped(&conn, tournament_id, &round, match_id)
    {
        Ok(Some(row)) => row,
        Ok(None) => return error_response(CoreError::NotFound("match")),
        Err(e) => return error_response(CoreError::Store(e)),
    };

    let action = if body.stepback.unwrap_or(false) {
        ScoreAction::Stepback
    } else {
        match body.new_score {
            Some(team_id) => ScoreAction::Increment(team_id),
            None => return error_response(CoreError::InvalidTeamReference),
        }
    };

    match ledger::record_or_step_back(&mut conn, match_id, action, body.positions.as_ref()) {
        Ok(score) => {
            state.push.publish(PushMessage::ScoreUpdate {
                team_a: score.team_a,
                team_b: score.team_b,
            });
            if let Some(winner_team_id) = match_row.winner_team_id {
                state.push.publish(PushMessage::MatchEnd { winner_team_id });
            }
            Json(ScoreUpdateResponse {
                success: true,
                scores: score,
            })
            .into_response()
        }
        Err(e) => error_response(e),
    }
}
