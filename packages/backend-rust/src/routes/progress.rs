use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use super::ProfileQuery;
use crate::response::{AppError, SuccessResponse};
use crate::services::progress;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(summary))
        .route("/reset", post(reset))
        .route("/practiced", get(practiced))
}

pub fn rewards_router() -> Router<AppState> {
    Router::new().route("/api/rewards", get(rewards))
}

async fn summary(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, AppError> {
    let profile = query.profile()?;
    let summary = progress::summary(&state, &profile, query.session_id())?;
    Ok(SuccessResponse::ok(summary).into_response())
}

async fn reset(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, AppError> {
    let profile = query.profile()?;
    let report = progress::reset(&state, &profile, chrono::Utc::now());
    Ok(SuccessResponse::ok(report).into_response())
}

async fn practiced(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, AppError> {
    let profile = query.profile()?;
    let report = progress::practiced(&state, &profile)?;
    Ok(SuccessResponse::ok(report).into_response())
}

async fn rewards(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, AppError> {
    let profile = query.profile()?;
    let report = progress::rewards(&state, &profile)?;
    Ok(SuccessResponse::ok(report).into_response())
}
