//! Progress & Reward Derivation
//!
//! Every progress value is a pure function of the result-record history:
//!
//! - stars: sum of scores, grouped by session for the breakdown
//! - completed sessions: sessions whose recorded game types cover a subject's required set
//! - weak items: labels seen often enough with low accuracy
//! - reward tiers: thresholds at or below the star total
//!
//! All aggregates are sums, groupings and filters, so the result does not depend on the
//! order in which records arrived. A reset is a watermark timestamp, never a deletion.

pub mod rewards;

pub use rewards::{derive_tiers, normalize_tiers, tier_statuses, RewardTier, TierStatus};

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::ResultRecord;
use crate::types::{GameType, Subject, WEAK_ITEM_LIMIT, WEAK_ITEM_MAX_ACCURACY, WEAK_ITEM_MIN_SEEN};

// ==================== Configuration ====================

/// Game types a session must contain, per subject, to count as complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRequirements {
    pub english: Vec<GameType>,
    pub math: Vec<GameType>,
}

impl Default for SubjectRequirements {
    fn default() -> Self {
        Self {
            english: Subject::English.games().to_vec(),
            math: Subject::Math.games().to_vec(),
        }
    }
}

impl SubjectRequirements {
    pub fn required(&self, subject: Subject) -> &[GameType] {
        match subject {
            Subject::English => &self.english,
            Subject::Math => &self.math,
        }
    }

    /// Whether `played` covers the required set of at least one subject.
    ///
    /// An empty requirement never completes a session.
    pub fn is_complete(&self, played: &BTreeSet<GameType>) -> bool {
        Subject::ALL.iter().any(|subject| {
            let required = self.required(*subject);
            !required.is_empty() && required.iter().all(|g| played.contains(g))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakItemPolicy {
    pub min_seen: usize,
    /// Items with accuracy strictly below this are weak
    pub max_accuracy: f64,
    pub limit: usize,
}

impl Default for WeakItemPolicy {
    fn default() -> Self {
        Self {
            min_seen: WEAK_ITEM_MIN_SEEN,
            max_accuracy: WEAK_ITEM_MAX_ACCURACY,
            limit: WEAK_ITEM_LIMIT,
        }
    }
}

// ==================== Results ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakItem {
    pub label: String,
    pub category: String,
    pub seen: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub last_seen: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_stars: i64,
    pub stars_by_session: BTreeMap<String, i64>,
    pub completed_sessions: Vec<String>,
    pub weak_items: Vec<WeakItem>,
    pub earned_tiers: Vec<RewardTier>,
    pub next_tier: Option<RewardTier>,
    pub record_count: usize,
    /// Share of correct item results, `None` without any item results
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticedItem {
    pub label: String,
    pub category: String,
    pub attempts: usize,
    pub correct: usize,
}

// ==================== Derivation ====================

pub fn summarize(
    records: &[ResultRecord],
    tiers: &[RewardTier],
    requirements: &SubjectRequirements,
) -> ProgressSummary {
    summarize_with(records, tiers, requirements, &WeakItemPolicy::default())
}

/// Summary over the records of one session only.
pub fn summarize_scoped(
    records: &[ResultRecord],
    session_id: &str,
    tiers: &[RewardTier],
    requirements: &SubjectRequirements,
) -> ProgressSummary {
    let scoped: Vec<ResultRecord> = records
        .iter()
        .filter(|r| r.session_id == session_id)
        .cloned()
        .collect();
    summarize(&scoped, tiers, requirements)
}

pub fn summarize_with(
    records: &[ResultRecord],
    tiers: &[RewardTier],
    requirements: &SubjectRequirements,
    policy: &WeakItemPolicy,
) -> ProgressSummary {
    let total_stars = total_stars(records);
    let (earned_tiers, next_tier) = derive_tiers(tiers, total_stars);

    let (correct, attempted) = records
        .iter()
        .flat_map(|r| r.item_results.iter())
        .fold((0usize, 0usize), |(c, n), item| (c + item.correct as usize, n + 1));
    let accuracy = (attempted > 0).then(|| correct as f64 / attempted as f64);

    ProgressSummary {
        total_stars,
        stars_by_session: stars_by_session(records),
        completed_sessions: completed_sessions(records, requirements),
        weak_items: weak_items(records, policy),
        earned_tiers,
        next_tier,
        record_count: records.len(),
        accuracy,
    }
}

/// Sum of scores, saturating at `i64::MAX`.
pub fn total_stars(records: &[ResultRecord]) -> i64 {
    records.iter().map(|r| r.score).fold(0i64, i64::saturating_add)
}

pub fn stars_by_session(records: &[ResultRecord]) -> BTreeMap<String, i64> {
    let mut stars = BTreeMap::new();
    for record in records {
        let total = stars.entry(record.session_id.clone()).or_insert(0i64);
        *total = total.saturating_add(record.score);
    }
    stars
}

/// Sessions whose played game types satisfy a subject requirement, sorted by id.
pub fn completed_sessions(records: &[ResultRecord], requirements: &SubjectRequirements) -> Vec<String> {
    let mut played: BTreeMap<&str, BTreeSet<GameType>> = BTreeMap::new();
    for record in records {
        played
            .entry(record.session_id.as_str())
            .or_default()
            .insert(record.game_type);
    }

    played
        .into_iter()
        .filter(|(_, games)| requirements.is_complete(games))
        .map(|(session, _)| session.to_string())
        .collect()
}

/// Weak items, worst first.
///
/// Ordering: accuracy ascending, then most recently seen first, then label ascending.
/// None of these keys depend on record arrival order.
pub fn weak_items(records: &[ResultRecord], policy: &WeakItemPolicy) -> Vec<WeakItem> {
    struct Tally {
        seen: usize,
        correct: usize,
        last_seen: DateTime<Utc>,
        category: String,
    }

    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    for record in records {
        for item in &record.item_results {
            let tally = tallies.entry(item.label.as_str()).or_insert_with(|| Tally {
                seen: 0,
                correct: 0,
                last_seen: record.timestamp,
                category: item.category.clone(),
            });
            tally.seen += 1;
            tally.correct += item.correct as usize;

            let newer = record.timestamp > tally.last_seen;
            let same_time_bigger_category =
                record.timestamp == tally.last_seen && item.category > tally.category;
            if newer || same_time_bigger_category {
                tally.last_seen = record.timestamp;
                tally.category = item.category.clone();
            }
        }
    }

    let mut weak: Vec<WeakItem> = tallies
        .into_iter()
        .filter(|(_, t)| t.seen >= policy.min_seen)
        .map(|(label, t)| WeakItem {
            label: label.to_string(),
            category: t.category,
            seen: t.seen,
            correct: t.correct,
            accuracy: t.correct as f64 / t.seen as f64,
            last_seen: t.last_seen,
        })
        .filter(|w| w.accuracy < policy.max_accuracy)
        .collect();

    weak.sort_by(|a, b| {
        a.accuracy
            .total_cmp(&b.accuracy)
            .then_with(|| b.last_seen.cmp(&a.last_seen))
            .then_with(|| a.label.cmp(&b.label))
    });
    weak.truncate(policy.limit);
    weak
}

/// Distinct items practiced in records at or after `watermark`, sorted by label.
///
/// Without a watermark every record counts.
pub fn practiced_since(
    records: &[ResultRecord],
    watermark: Option<DateTime<Utc>>,
) -> Vec<PracticedItem> {
    let mut items: BTreeMap<&str, PracticedItem> = BTreeMap::new();
    let mut latest: HashMap<&str, DateTime<Utc>> = HashMap::new();

    for record in records {
        if watermark.is_some_and(|w| record.timestamp < w) {
            continue;
        }
        for item in &record.item_results {
            let entry = items.entry(item.label.as_str()).or_insert_with(|| PracticedItem {
                label: item.label.clone(),
                category: item.category.clone(),
                attempts: 0,
                correct: 0,
            });
            entry.attempts += 1;
            entry.correct += item.correct as usize;

            let seen_at = latest.entry(item.label.as_str()).or_insert(record.timestamp);
            let replace = match record.timestamp.cmp(seen_at) {
                Ordering::Greater => true,
                Ordering::Equal => item.category > entry.category,
                Ordering::Less => false,
            };
            if replace {
                *seen_at = record.timestamp;
                entry.category = item.category.clone();
            }
        }
    }

    items.into_values().collect()
}
