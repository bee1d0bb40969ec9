use chrono::{DateTime, Utc};
use serde::Serialize;

use playlearn_algo::progress::total_stars;
use playlearn_algo::{
    practiced_since, summarize, summarize_scoped, tier_statuses, PracticedItem, ProgressSummary,
    TierStatus,
};

use crate::state::AppState;
use crate::store::LogError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticedReport {
    pub profile: String,
    pub watermark: Option<DateTime<Utc>>,
    pub items: Vec<PracticedItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetReport {
    pub profile: String,
    pub watermark: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsReport {
    pub profile: String,
    pub total_stars: i64,
    pub tiers: Vec<TierStatus>,
}

pub fn summary(
    state: &AppState,
    profile: &str,
    session_id: Option<&str>,
) -> Result<ProgressSummary, LogError> {
    let records = state.result_log().list(profile)?;
    let config = state.config();

    Ok(match session_id.map(str::trim).filter(|s| !s.is_empty()) {
        Some(session) => summarize_scoped(&records, session, &config.reward_tiers, &config.requirements),
        None => summarize(&records, &config.reward_tiers, &config.requirements),
    })
}

/// Start a new practice window. Stars, history and tiers are untouched.
pub fn reset(state: &AppState, profile: &str, now: DateTime<Utc>) -> ResetReport {
    let watermark = state.watermarks().reset(profile, now);
    tracing::info!(profile, %watermark, "progress window reset");
    ResetReport {
        profile: profile.to_string(),
        watermark,
    }
}

pub fn practiced(state: &AppState, profile: &str) -> Result<PracticedReport, LogError> {
    let records = state.result_log().list(profile)?;
    let watermark = state.watermarks().get(profile);
    Ok(PracticedReport {
        profile: profile.to_string(),
        watermark,
        items: practiced_since(&records, watermark),
    })
}

pub fn rewards(state: &AppState, profile: &str) -> Result<RewardsReport, LogError> {
    let records = state.result_log().list(profile)?;
    let total = total_stars(&records);
    Ok(RewardsReport {
        profile: profile.to_string(),
        total_stars: total,
        tiers: tier_statuses(&state.config().reward_tiers, total),
    })
}
