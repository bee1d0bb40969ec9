use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// Per-profile reset points. Records at or after a profile's watermark count as
/// "practiced since the last reset".
#[derive(Debug, Default)]
pub struct WatermarkStore {
    marks: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl WatermarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, profile: &str) -> Option<DateTime<Utc>> {
        self.marks.read().get(profile).copied()
    }

    /// Move the watermark of `profile` to `at`. A watermark never moves backwards;
    /// the effective value is returned.
    pub fn reset(&self, profile: &str, at: DateTime<Utc>) -> DateTime<Utc> {
        let mut marks = self.marks.write();
        let mark = marks.entry(profile.to_string()).or_insert(at);
        if at > *mark {
            *mark = at;
        }
        *mark
    }
}
