use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use playlearn_algo::{MathCategory, DEFAULT_OPTION_COUNT};

use crate::response::{AppError, SuccessResponse};
use crate::state::AppState;

const MAX_OPTION_COUNT: usize = 8;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(problem))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProblemQuery {
    category: Option<String>,
    topic: Option<String>,
    mode: Option<String>,
    options: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Plain,
    Judgment,
    Choice,
}

impl Mode {
    fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim).unwrap_or("plain") {
            "" | "plain" => Some(Self::Plain),
            "judgment" => Some(Self::Judgment),
            "choice" => Some(Self::Choice),
            _ => None,
        }
    }
}

/// One problem for `category`, or for a random category of `topic`.
///
/// Unknown categories and topics fall back to defaults instead of failing; only a
/// missing selector or an unknown mode is rejected.
async fn problem(
    State(state): State<AppState>,
    Query(query): Query<ProblemQuery>,
) -> Result<Response, AppError> {
    let mode = Mode::parse(query.mode.as_deref()).ok_or_else(|| {
        AppError::validation("mode must be one of plain, judgment, choice")
    })?;

    let mut generator = state.generator();
    let category = match (query.category.as_deref(), query.topic.as_deref()) {
        (Some(name), _) if !name.trim().is_empty() => MathCategory::parse(name).unwrap_or_else(|| {
            tracing::warn!(category = %name, fallback = %MathCategory::FALLBACK, "unknown math category");
            MathCategory::FALLBACK
        }),
        (_, Some(topic)) if !topic.trim().is_empty() => generator.pick_category(topic),
        _ => return Err(AppError::validation("either category or topic is required")),
    };

    let response = match mode {
        Mode::Plain => SuccessResponse::ok(generator.generate(category)).into_response(),
        Mode::Judgment => SuccessResponse::ok(generator.judgment(category)).into_response(),
        Mode::Choice => {
            let count = query
                .options
                .unwrap_or(DEFAULT_OPTION_COUNT)
                .clamp(2, MAX_OPTION_COUNT);
            SuccessResponse::ok(generator.multiple_choice(category, count)).into_response()
        }
    };
    Ok(response)
}
