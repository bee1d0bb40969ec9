pub mod config;
pub mod logging;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::state::AppState;

/// Application wired from the environment with the in-memory result log.
pub async fn create_app() -> axum::Router {
    build_app(AppState::in_memory(Config::from_env()))
}

pub fn build_app(state: AppState) -> axum::Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
