mod catalog;
mod health;
mod plan;
mod problems;
mod progress;
mod records;

use axum::response::{IntoResponse, Response};
use axum::Router;
use serde::Deserialize;

use crate::response::AppError;
use crate::state::AppState;
use crate::store::resolve_profile;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health::router())
        .nest("/api/catalog", catalog::router())
        .nest("/api/plan", plan::router())
        .nest("/api/problems", problems::router())
        .nest("/api/records", records::router())
        .nest("/api/progress", progress::router())
        .merge(progress::rewards_router())
        .fallback(fallback_handler)
        .with_state(state)
}

/// `?profile=` shared by the learner-scoped routes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileQuery {
    profile: Option<String>,
    session_id: Option<String>,
}

impl ProfileQuery {
    fn profile(&self) -> Result<String, AppError> {
        resolve_profile(self.profile.as_deref()).map_err(AppError::from)
    }

    fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}

async fn fallback_handler() -> Response {
    AppError::not_found("Endpoint not found").into_response()
}
