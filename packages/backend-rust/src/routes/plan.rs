use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::response::{AppError, SuccessResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:unit_id", get(plan_unit))
}

/// A fresh plan on every call; replaying a session means requesting a new plan.
async fn plan_unit(
    State(state): State<AppState>,
    Path(unit_id): Path<String>,
) -> Result<Response, AppError> {
    let unit = state
        .catalog()
        .unit(&unit_id)
        .ok_or_else(|| AppError::not_found(format!("unit not found: {unit_id}")))?;

    let report = state.planner().plan_with_report(unit);
    Ok(SuccessResponse::ok(report).into_response())
}
