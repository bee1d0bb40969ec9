use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use playlearn_algo::{NewResultRecord, ResultRecord};

use super::ProfileQuery;
use crate::response::{AppError, SuccessResponse};
use crate::services::record::{self, Submission};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_records).post(create_record))
}

/// Returned when the record was valid but the log could not store it.
#[derive(Serialize)]
struct UnpersistedResponse {
    success: bool,
    error: String,
    code: &'static str,
    data: ResultRecord,
}

async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, AppError> {
    let profile = query.profile()?;
    let records = record::history(state.result_log(), &profile, query.session_id())?;
    Ok(SuccessResponse::ok(records).into_response())
}

async fn create_record(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
    body: Result<Json<NewResultRecord>, JsonRejection>,
) -> Result<Response, AppError> {
    let profile = query.profile()?;
    let Json(input) = body.map_err(|rejection| AppError::validation(rejection.body_text()))?;

    let response = match record::submit(state.result_log(), &profile, input, chrono::Utc::now())? {
        Submission::Stored(record) => (StatusCode::CREATED, SuccessResponse::ok(record)).into_response(),
        Submission::Unpersisted { record, error } => (
            StatusCode::ACCEPTED,
            Json(UnpersistedResponse {
                success: false,
                error: error.to_string(),
                code: "PERSISTENCE_UNAVAILABLE",
                data: record,
            }),
        )
            .into_response(),
    };
    Ok(response)
}
