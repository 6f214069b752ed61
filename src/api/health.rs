use axum::{extract::State, routing::get, Router};

use crate::state::AppState;

/// Health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(banner))
}

/// GET / - Liveness probe, plain text
async fn banner(State(state): State<AppState>) -> String {
    state.config.health_banner.clone()
}
