//! Common Types and Constants
//!
//! Shared data structures used across the planner, generators and progress layer.

use std::fmt;

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Scramble sentences picked per session
pub const DEFAULT_SCRAMBLE_SLOTS: usize = 6;

/// Judgment sentences picked per session
pub const DEFAULT_JUDGMENT_SLOTS: usize = 8;

/// Upper bound on generate-and-retry attempts for one problem
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: usize = 64;

/// Minimum occurrences before an item can be reported as weak
pub const WEAK_ITEM_MIN_SEEN: usize = 2;

/// Items at or above this accuracy are not weak
pub const WEAK_ITEM_MAX_ACCURACY: f64 = 0.70;

/// Maximum number of weak items reported
pub const WEAK_ITEM_LIMIT: usize = 10;

/// Default number of options in a multiple-choice round
pub const DEFAULT_OPTION_COUNT: usize = 4;

/// Largest max score a single result record may claim
pub const MAX_RECORD_SCORE: i64 = 1_000;

// ==================== Subjects & Games ====================

/// Subject a game belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    English,
    Math,
}

impl Subject {
    pub const ALL: [Subject; 2] = [Subject::English, Subject::Math];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "english" => Some(Self::English),
            "math" => Some(Self::Math),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Math => "math",
        }
    }

    /// Game types that make up a full session of this subject.
    pub fn games(&self) -> &'static [GameType] {
        match self {
            Self::English => &GameType::ENGLISH,
            Self::Math => &GameType::MATH,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of legal game types a result record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    /// Match words to pictures (direct set A)
    WordMatch,
    /// Reorder the words of a sentence (scramble set)
    SentenceScramble,
    /// Hear a word, pick its picture (direct set B)
    PicturePick,
    /// Decide whether a sentence fits its picture (judgment set)
    SentenceJudge,
    MathQuiz,
    MathTrueFalse,
    MathFillIn,
    MathSpeed,
}

impl GameType {
    pub const ENGLISH: [GameType; 4] = [
        GameType::WordMatch,
        GameType::SentenceScramble,
        GameType::PicturePick,
        GameType::SentenceJudge,
    ];

    pub const MATH: [GameType; 4] = [
        GameType::MathQuiz,
        GameType::MathTrueFalse,
        GameType::MathFillIn,
        GameType::MathSpeed,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "word_match" => Some(Self::WordMatch),
            "sentence_scramble" => Some(Self::SentenceScramble),
            "picture_pick" => Some(Self::PicturePick),
            "sentence_judge" => Some(Self::SentenceJudge),
            "math_quiz" => Some(Self::MathQuiz),
            "math_true_false" => Some(Self::MathTrueFalse),
            "math_fill_in" => Some(Self::MathFillIn),
            "math_speed" => Some(Self::MathSpeed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WordMatch => "word_match",
            Self::SentenceScramble => "sentence_scramble",
            Self::PicturePick => "picture_pick",
            Self::SentenceJudge => "sentence_judge",
            Self::MathQuiz => "math_quiz",
            Self::MathTrueFalse => "math_true_false",
            Self::MathFillIn => "math_fill_in",
            Self::MathSpeed => "math_speed",
        }
    }

    pub fn subject(&self) -> Subject {
        match self {
            Self::WordMatch | Self::SentenceScramble | Self::PicturePick | Self::SentenceJudge => {
                Subject::English
            }
            Self::MathQuiz | Self::MathTrueFalse | Self::MathFillIn | Self::MathSpeed => {
                Subject::Math
            }
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
