use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    referee::{get_referee_match_view, join_as_referee, update_match_score},
    tournaments::{get_match_view, get_round_view, get_tournament_rounds},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/tournaments/:id/rounds", get(get_tournament_rounds))
        .route("/api/tournaments/:id/join", post(join_as_referee))
        .route(
            "/api/tournaments/referee/:id/:round/:match",
            get(get_referee_match_view).post(update_match_score),
        )
        .route("/api/tournaments/:id/:round", get(get_round_view))
        .route("/api/tournaments/:id/:round/:match", get(get_match_view))
        .with_state(state)
}
