use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use playlearn_algo::Subject;

use crate::response::{AppError, SuccessResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/:subject/:unit_id", get(unit))
}

async fn index(State(state): State<AppState>) -> Response {
    SuccessResponse::ok(state.catalog().index()).into_response()
}

/// English units by id, math topics by id.
async fn unit(
    State(state): State<AppState>,
    Path((subject, unit_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let subject = Subject::parse(&subject)
        .ok_or_else(|| AppError::bad_request(format!("unknown subject: {subject}")))?;
    let catalog = state.catalog();

    match subject {
        Subject::English => catalog
            .unit(&unit_id)
            .map(|unit| SuccessResponse::ok(unit).into_response())
            .ok_or_else(|| AppError::not_found(format!("unit not found: {unit_id}"))),
        Subject::Math => catalog
            .topic(&unit_id)
            .map(|topic| SuccessResponse::ok(topic).into_response())
            .ok_or_else(|| AppError::not_found(format!("topic not found: {unit_id}"))),
    }
}
