//! # playlearn-algo - content engine for the learning mini-games
//!
//! Pure Rust, no I/O beyond the compiled-in catalog:
//!
//! - **Session Planner** - greedy set cover that spreads a unit's vocabulary over the
//!   four English games so a full session touches every item
//! - **Math Generator** - category-dispatched generate-and-retry with a retry ceiling,
//!   true/false mutation, hints and near-miss distractors
//! - **Progress** - stars, completed sessions, weak items and reward tiers, all derived
//!   from the append-only result-record log
//!
//! ## Modules
//!
//! - [`catalog`] - vocabulary units, example sentences, math categories and topics
//! - [`planner`] - session planning and coverage validation
//! - [`math`] - problem generation, judgment problems, distractors
//! - [`record`] - result records and their validation
//! - [`progress`] - progress summaries and reward tiers
//! - [`sanitize`] - term normalization and tokenization
//! - [`types`] - shared enums and constants
//!
//! ## Example
//!
//! ```rust
//! use playlearn_algo::{Catalog, MathCategory, PlannerConfig, ProblemGenerator, SessionPlanner};
//!
//! let unit = Catalog::builtin().unit("animals").unwrap();
//! let plan = SessionPlanner::with_seed(PlannerConfig::default(), 7).plan(unit);
//! assert!(plan.validate(unit).is_empty());
//!
//! let mut generator = ProblemGenerator::default();
//! let problem = generator.generate(MathCategory::DivideRemainder);
//! assert!(problem.check(problem.answer, problem.remainder));
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod catalog;
pub mod math;
pub mod planner;
pub mod progress;
pub mod record;
pub mod sanitize;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::*;

pub use catalog::{
    find_topic, topics, Catalog, CatalogError, CatalogIndex, ExampleSentence, MathCategory, Topic,
    Unit, UnitCheck, VocabularyItem,
};

pub use planner::{CoverageIndex, PlanReport, PlannerConfig, SessionPlan, SessionPlanner};

pub use math::{
    distractors, generate_batch, generate_with, Generation, GeneratorConfig, JudgmentProblem,
    MultipleChoice, Problem, ProblemGenerator,
};

pub use record::{ItemResult, NewResultRecord, RecordError, ResultRecord};

pub use progress::{
    practiced_since, summarize, summarize_scoped, summarize_with, tier_statuses, PracticedItem,
    ProgressSummary, RewardTier, SubjectRequirements, TierStatus, WeakItem, WeakItemPolicy,
};
