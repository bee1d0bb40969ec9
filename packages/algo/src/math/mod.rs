//! Procedural Math Problem Generator
//!
//! Category-dispatched generate-and-retry:
//! - each category samples its operands independently from individually valid ranges
//! - a violated compound constraint (e.g. product too large) triggers another draw
//! - draws are capped at `max_attempts`; past the cap the category's canonical problem
//!   is used, so generation never fails outward
//!
//! On top of plain problems the generator builds true/false judgment problems and
//! multiple-choice rounds with near-miss distractors.

mod categories;
pub mod distractor;
pub mod hints;
mod judgment;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog::{find_topic, topics, MathCategory};
use crate::types::{DEFAULT_MAX_GENERATION_ATTEMPTS, DEFAULT_OPTION_COUNT};

pub use distractor::distractors;

/// Stream separation for batch generation
const BATCH_STREAM_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

// ==================== Data Structures ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Full statement with the solution, e.g. `38 ÷ 5 = 7 … 3`
    pub equation_text: String,
    /// Statement shown to the learner, e.g. `38 ÷ 5 = ? … ?`
    pub display_text: String,
    pub answer: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remainder: Option<i64>,
    pub category: MathCategory,
    /// Sampled numbers in statement order
    pub operands: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Problem {
    pub fn from_parts(
        category: MathCategory,
        operands: Vec<i64>,
        answer: i64,
        remainder: Option<i64>,
    ) -> Self {
        let display_text = categories::display(category, &operands);
        let equation_text = categories::statement(category, &operands, answer, remainder);
        let hint = Some(hints::hint_for(category, &operands));
        Self {
            equation_text,
            display_text,
            answer,
            remainder,
            category,
            operands,
            hint,
        }
    }

    fn from_draft(category: MathCategory, draft: categories::Draft) -> Self {
        Self::from_parts(category, draft.operands, draft.answer, draft.remainder)
    }

    /// Whether a learner's answer (and remainder, where the category has one) is right.
    pub fn check(&self, answer: i64, remainder: Option<i64>) -> bool {
        answer == self.answer && remainder.unwrap_or(0) == self.remainder.unwrap_or(0)
    }
}

/// A true/false round: the learner judges `shown_statement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgmentProblem {
    pub problem: Problem,
    pub shown_statement: String,
    /// Revealed after a wrong judgment
    pub correct_statement: String,
    pub is_true: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoice {
    pub problem: Problem,
    pub options: Vec<i64>,
    pub correct_index: usize,
}

/// Outcome of one generation call.
#[derive(Debug, Clone)]
pub struct Generation {
    pub problem: Problem,
    /// Draws consumed, including the accepted one
    pub attempts: usize,
    /// Whether the retry ceiling was hit and the canonical problem used
    pub fell_back: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    pub max_attempts: usize,
    /// Probability that a judgment problem shows a wrong statement
    pub false_statement_rate: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            false_statement_rate: 0.5,
        }
    }
}

// ==================== Generator ====================

pub struct ProblemGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl ProblemGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let seed = {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        };
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&mut self, category: MathCategory) -> Problem {
        self.try_generate(category).problem
    }

    pub fn try_generate(&mut self, category: MathCategory) -> Generation {
        generate_with(category, self.config.max_attempts, &mut self.rng)
    }

    /// Generate by category identifier; unknown identifiers use the fallback category.
    pub fn generate_named(&mut self, name: &str) -> Problem {
        let category = MathCategory::parse(name).unwrap_or_else(|| {
            tracing::warn!(category = %name, fallback = %MathCategory::FALLBACK, "unknown math category");
            MathCategory::FALLBACK
        });
        self.generate(category)
    }

    /// Generate a problem from a random category of `topic_id`; unknown topics use the
    /// first topic.
    pub fn generate_for_topic(&mut self, topic_id: &str) -> Problem {
        let category = self.pick_category(topic_id);
        self.generate(category)
    }

    pub fn pick_category(&mut self, topic_id: &str) -> MathCategory {
        let topic = find_topic(topic_id).or_else(|| {
            let fallback = topics().first();
            tracing::warn!(
                topic = %topic_id,
                fallback = ?fallback.map(|t| t.id.as_str()),
                "unknown math topic"
            );
            fallback
        });
        topic
            .and_then(|t| t.categories.choose(&mut self.rng).copied())
            .unwrap_or(MathCategory::FALLBACK)
    }

    /// A true/false problem; with `false_statement_rate` probability the shown
    /// statement carries a category-specific slip.
    pub fn judgment(&mut self, category: MathCategory) -> JudgmentProblem {
        let problem = self.generate(category);
        let correct_statement = problem.equation_text.clone();
        let rate = if self.config.false_statement_rate.is_finite() {
            self.config.false_statement_rate.clamp(0.0, 1.0)
        } else {
            0.5
        };

        if self.rng.gen_bool(rate) {
            let shown_statement = judgment::wrong_statement(&problem, &mut self.rng);
            JudgmentProblem {
                problem,
                shown_statement,
                correct_statement,
                is_true: false,
            }
        } else {
            JudgmentProblem {
                problem,
                shown_statement: correct_statement.clone(),
                correct_statement,
                is_true: true,
            }
        }
    }

    /// A multiple-choice round with `option_count` options (at least two).
    pub fn multiple_choice(&mut self, category: MathCategory, option_count: usize) -> MultipleChoice {
        let problem = self.generate(category);
        let option_count = option_count.max(2);

        let mut options = distractors(problem.answer, option_count - 1, &mut self.rng);
        options.push(problem.answer);
        options.shuffle(&mut self.rng);
        let correct_index = options
            .iter()
            .position(|v| *v == problem.answer)
            .unwrap_or_default();

        MultipleChoice {
            problem,
            options,
            correct_index,
        }
    }

    pub fn default_multiple_choice(&mut self, category: MathCategory) -> MultipleChoice {
        self.multiple_choice(category, DEFAULT_OPTION_COUNT)
    }

    pub fn distractors(&mut self, answer: i64, count: usize) -> Vec<i64> {
        distractors(answer, count, &mut self.rng)
    }
}

impl Default for ProblemGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// Generate-and-retry for one category with an explicit attempt ceiling.
pub fn generate_with<R: Rng + ?Sized>(
    category: MathCategory,
    max_attempts: usize,
    rng: &mut R,
) -> Generation {
    let max_attempts = max_attempts.max(1);
    for attempt in 1..=max_attempts {
        if let Some(draft) = categories::sample(category, rng) {
            return Generation {
                problem: Problem::from_draft(category, draft),
                attempts: attempt,
                fell_back: false,
            };
        }
    }

    tracing::warn!(
        category = %category,
        attempts = max_attempts,
        "retry ceiling reached, using canonical problem"
    );
    Generation {
        problem: Problem::from_draft(category, categories::canonical(category)),
        attempts: max_attempts,
        fell_back: true,
    }
}

/// A reproducible round of `count` problems, generated in parallel.
///
/// Problem `i` is drawn from its own ChaCha8 stream derived from `seed`, so the batch
/// is identical regardless of thread scheduling.
pub fn generate_batch(
    category: MathCategory,
    count: usize,
    seed: u64,
    config: &GeneratorConfig,
) -> Vec<Problem> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let stream_seed = seed ^ (i as u64).wrapping_add(1).wrapping_mul(BATCH_STREAM_STRIDE);
            let mut rng = ChaCha8Rng::seed_from_u64(stream_seed);
            generate_with(category, config.max_attempts, &mut rng).problem
        })
        .collect()
}
