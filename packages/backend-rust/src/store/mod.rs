//! Result log and reset watermarks.
//!
//! The result log is append-only: records are never edited or deleted, and every
//! progress value is recomputed from it. A progress reset only moves the profile's
//! watermark forward.

mod watermark;

pub use watermark::WatermarkStore;

use std::collections::HashMap;

use parking_lot::RwLock;
use playlearn_algo::ResultRecord;

pub const DEFAULT_PROFILE: &str = "default";
const MAX_PROFILE_LEN: usize = 64;

#[derive(Debug, Clone, thiserror::Error)]
pub enum LogError {
    #[error("result log unavailable: {0}")]
    Unavailable(String),
    #[error("invalid profile id: {0}")]
    InvalidProfile(String),
}

/// Storage seam for result records, keyed by learner profile.
pub trait ResultLog: Send + Sync {
    fn append(&self, profile: &str, record: ResultRecord) -> Result<(), LogError>;

    /// All records of `profile` in append order.
    fn list(&self, profile: &str) -> Result<Vec<ResultRecord>, LogError>;
}

#[derive(Debug, Default)]
pub struct InMemoryResultLog {
    records: RwLock<HashMap<String, Vec<ResultRecord>>>,
}

impl InMemoryResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultLog for InMemoryResultLog {
    fn append(&self, profile: &str, record: ResultRecord) -> Result<(), LogError> {
        self.records
            .write()
            .entry(profile.to_string())
            .or_default()
            .push(record);
        Ok(())
    }

    fn list(&self, profile: &str) -> Result<Vec<ResultRecord>, LogError> {
        Ok(self.records.read().get(profile).cloned().unwrap_or_default())
    }
}

/// Resolve the `profile` query value: blank means the default profile, anything else
/// must be a short identifier of ASCII letters, digits, `-` and `_`.
pub fn resolve_profile(raw: Option<&str>) -> Result<String, LogError> {
    let profile = raw.map(str::trim).unwrap_or_default();
    if profile.is_empty() {
        return Ok(DEFAULT_PROFILE.to_string());
    }

    let valid = profile.len() <= MAX_PROFILE_LEN
        && profile
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(LogError::InvalidProfile(profile.to_string()));
    }
    Ok(profile.to_string())
}
