mod body;
pub mod health;
pub mod matches;
pub mod players;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/players", post(players::register_player))
        .route("/players/retrieve", post(players::retrieve_player))
        .route("/matches", post(matches::create_match))
        .route("/matches/{match_uuid}", get(matches::get_match))
        .route("/matches/{match_uuid}/ready", post(matches::mark_ready))
        .route("/matches/{match_uuid}/turn", post(matches::record_turn))
        .route("/matches/{match_uuid}/draw", post(matches::agree_to_draw))
        .route("/matches/{match_uuid}/resign", post(matches::resign))
        .route("/matches/{match_uuid}/winner", post(matches::declare_winner))
}
