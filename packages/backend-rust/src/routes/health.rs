use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/live", get(live))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    start_time: String,
    uptime: u64,
    version: &'static str,
    catalog_version: String,
    units: usize,
}

#[derive(Serialize)]
struct LivenessResponse {
    status: &'static str,
    timestamp: String,
    uptime: u64,
}

async fn root(State(state): State<AppState>) -> Response {
    let catalog = state.catalog();
    let response = HealthResponse {
        status: "ok",
        timestamp: now_iso(),
        start_time: system_time_iso(state.started_at_system()),
        uptime: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION"),
        catalog_version: catalog.version.clone(),
        units: catalog.units().len(),
    };

    Json(response).into_response()
}

async fn live(State(state): State<AppState>) -> Response {
    Json(LivenessResponse {
        status: "healthy",
        timestamp: now_iso(),
        uptime: state.uptime_seconds(),
    })
    .into_response()
}

fn system_time_iso(time: std::time::SystemTime) -> String {
    let datetime: chrono::DateTime<chrono::Utc> = time.into();
    datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
