//! Result records.
//!
//! One record per completed round-set. Records are append-only: once validated they are
//! never mutated, and every progress value is derived from them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sanitize::clean_label;
use crate::types::{GameType, MAX_RECORD_SCORE};

/// How far in the past a client-supplied timestamp may lie
const TIMESTAMP_PAST_LIMIT_HOURS: i64 = 24;
/// How far in the future a client-supplied timestamp may lie
const TIMESTAMP_FUTURE_LIMIT_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResult {
    pub label: String,
    pub correct: bool,
    #[serde(default)]
    pub category: String,
}

impl ItemResult {
    pub fn new(label: impl Into<String>, correct: bool, category: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            correct,
            category: category.into(),
        }
    }
}

/// A record as submitted by a client, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResultRecord {
    pub game_type: String,
    pub score: i64,
    pub max_score: i64,
    #[serde(default)]
    pub item_results: Vec<ItemResult>,
    pub session_id: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub id: String,
    pub game_type: GameType,
    pub score: i64,
    pub max_score: i64,
    pub item_results: Vec<ItemResult>,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("unknown game type: {0}")]
    UnknownGameType(String),
    #[error("score must not be negative, got {0}")]
    NegativeScore(i64),
    #[error("max score must be positive, got {0}")]
    InvalidMaxScore(i64),
    #[error("max score {0} exceeds the limit of {max}", max = MAX_RECORD_SCORE)]
    MaxScoreTooLarge(i64),
    #[error("score {score} exceeds max score {max_score}")]
    ScoreExceedsMax { score: i64, max_score: i64 },
    #[error("session id must not be empty")]
    EmptySessionId,
    #[error("item result {0} has an empty label")]
    EmptyItemLabel(usize),
    #[error("timestamp {0} is outside the accepted window")]
    TimestampOutOfRange(DateTime<Utc>),
}

impl NewResultRecord {
    /// Validate and stamp the record. `now` is the server clock.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ResultRecord, RecordError> {
        let game_type = GameType::parse(&self.game_type)
            .ok_or_else(|| RecordError::UnknownGameType(self.game_type.clone()))?;

        if self.max_score <= 0 {
            return Err(RecordError::InvalidMaxScore(self.max_score));
        }
        if self.max_score > MAX_RECORD_SCORE {
            return Err(RecordError::MaxScoreTooLarge(self.max_score));
        }
        if self.score < 0 {
            return Err(RecordError::NegativeScore(self.score));
        }
        if self.score > self.max_score {
            return Err(RecordError::ScoreExceedsMax {
                score: self.score,
                max_score: self.max_score,
            });
        }

        let session_id = self.session_id.trim().to_string();
        if session_id.is_empty() {
            return Err(RecordError::EmptySessionId);
        }

        let item_results = self
            .item_results
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let label = clean_label(&item.label).ok_or(RecordError::EmptyItemLabel(i))?;
                Ok(ItemResult {
                    label,
                    correct: item.correct,
                    category: item.category.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>, RecordError>>()?;

        let timestamp = match self.timestamp {
            Some(ts) => validate_timestamp(ts, now)?,
            None => now,
        };

        Ok(ResultRecord {
            id: Uuid::new_v4().to_string(),
            game_type,
            score: self.score,
            max_score: self.max_score,
            item_results,
            session_id,
            timestamp,
        })
    }
}

fn validate_timestamp(ts: DateTime<Utc>, now: DateTime<Utc>) -> Result<DateTime<Utc>, RecordError> {
    let earliest = now - Duration::hours(TIMESTAMP_PAST_LIMIT_HOURS);
    let latest = now + Duration::minutes(TIMESTAMP_FUTURE_LIMIT_MINUTES);
    if ts < earliest || ts > latest {
        return Err(RecordError::TimestampOutOfRange(ts));
    }
    Ok(ts)
}

impl ResultRecord {
    /// Build an already-trusted record, e.g. when replaying history.
    pub fn new(
        game_type: GameType,
        score: i64,
        max_score: i64,
        item_results: Vec<ItemResult>,
        session_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            game_type,
            score,
            max_score,
            item_results,
            session_id: session_id.into(),
            timestamp,
        }
    }

    pub fn accuracy(&self) -> Option<f64> {
        if self.item_results.is_empty() {
            return None;
        }
        let correct = self.item_results.iter().filter(|r| r.correct).count();
        Some(correct as f64 / self.item_results.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(game_type: &str, score: i64, max_score: i64) -> NewResultRecord {
        NewResultRecord {
            game_type: game_type.to_string(),
            score,
            max_score,
            item_results: vec![ItemResult::new(" cat ", true, "pets")],
            session_id: "unit-1".to_string(),
            timestamp: None,
        }
    }

    #[test]
    fn test_valid_record() {
        let now = Utc::now();
        let record = input("word_match", 3, 5).validate(now).unwrap();
        assert_eq!(record.game_type, GameType::WordMatch);
        assert_eq!(record.timestamp, now);
        assert_eq!(record.item_results[0].label, "cat");
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_rejects_unknown_game_type() {
        let err = input("tic_tac_toe", 1, 5).validate(Utc::now()).unwrap_err();
        assert_eq!(err, RecordError::UnknownGameType("tic_tac_toe".to_string()));
    }

    #[test]
    fn test_rejects_score_above_max() {
        let err = input("math_quiz", 6, 5).validate(Utc::now()).unwrap_err();
        assert_eq!(
            err,
            RecordError::ScoreExceedsMax {
                score: 6,
                max_score: 5
            }
        );
    }

    #[test]
    fn test_rejects_bad_scores_and_session() {
        assert_eq!(
            input("math_quiz", -1, 5).validate(Utc::now()).unwrap_err(),
            RecordError::NegativeScore(-1)
        );
        assert_eq!(
            input("math_quiz", 0, 0).validate(Utc::now()).unwrap_err(),
            RecordError::InvalidMaxScore(0)
        );

        let mut no_session = input("math_quiz", 1, 5);
        no_session.session_id = "  ".to_string();
        assert_eq!(
            no_session.validate(Utc::now()).unwrap_err(),
            RecordError::EmptySessionId
        );
    }

    #[test]
    fn test_max_score_is_capped() {
        assert!(input("math_quiz", MAX_RECORD_SCORE, MAX_RECORD_SCORE)
            .validate(Utc::now())
            .is_ok());
        assert_eq!(
            input("math_quiz", i64::MAX, i64::MAX)
                .validate(Utc::now())
                .unwrap_err(),
            RecordError::MaxScoreTooLarge(i64::MAX)
        );
    }

    #[test]
    fn test_rejects_empty_item_label() {
        let mut record = input("word_match", 1, 5);
        record.item_results.push(ItemResult::new("", false, "pets"));
        assert_eq!(
            record.validate(Utc::now()).unwrap_err(),
            RecordError::EmptyItemLabel(1)
        );
    }

    #[test]
    fn test_client_timestamp_window() {
        let now = Utc::now();
        let mut recent = input("word_match", 1, 5);
        recent.timestamp = Some(now - Duration::hours(2));
        assert_eq!(recent.validate(now).unwrap().timestamp, now - Duration::hours(2));

        let mut stale = input("word_match", 1, 5);
        stale.timestamp = Some(now - Duration::days(3));
        assert!(matches!(
            stale.validate(now),
            Err(RecordError::TimestampOutOfRange(_))
        ));
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let raw = r#"{
            "gameType": "sentence_judge",
            "score": 7,
            "maxScore": 8,
            "itemResults": [{"label": "panda", "correct": true, "category": "wild"}],
            "sessionId": "animals"
        }"#;
        let input: NewResultRecord = serde_json::from_str(raw).unwrap();
        let record = input.validate(Utc::now()).unwrap();
        assert_eq!(record.game_type, GameType::SentenceJudge);
        assert_eq!(record.accuracy(), Some(1.0));
    }
}
