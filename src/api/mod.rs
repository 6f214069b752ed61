pub mod contact;
pub mod cors;
pub mod diagnostics;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Create the router with all routes and the configured CORS policy
pub fn create_router(state: AppState) -> Router {
    let cors = cors::cors_layer(&state.config.cors);

    Router::new()
        .nest("/api", api_routes())
        .merge(health::health_routes())
        .layer(cors)
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(contact::contact_routes())
        .merge(diagnostics::diagnostic_routes())
}
