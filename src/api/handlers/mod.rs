use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::errors::CoreError;
use crate::push::PushBroadcaster;

pub mod referee;
pub mod tournaments;

pub struct AppState {
    pub pool: Pool<SqliteConnectionManager>,
    pub push: PushBroadcaster,
}

pub fn error_response(err: CoreError) -> Response {
    let status = match &err {
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Unauthorized => StatusCode::FORBIDDEN,
        CoreError::InvalidTeamReference
        | CoreError::TournamentPairingsIncomplete
        | CoreError::PositionsIncomplete
        | CoreError::PositionsCrossTeam => StatusCode::BAD_REQUEST,
        CoreError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if let CoreError::Store(inner) = &err {
        log::error!("Store failure: {inner:?}");
    }

    (status, err.to_string()).into_response()
}

/// The acting player's identity, supplied by the (already authenticated)
/// request context.
pub fn player_id_from_headers(headers: &HeaderMap) -> Option<i64> {
    headers.get("x-player-id")?.to_str().ok()?.parse().ok()
}
