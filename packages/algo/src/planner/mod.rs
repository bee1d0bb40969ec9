//! Coverage-guaranteeing Session Planner
//!
//! Partitions a unit's vocabulary across the four English games so that a full play
//! session touches every item:
//!
//! - scramble slots are filled by greedy set cover over the scramble sentence pool
//! - judgment slots continue the same greedy pass over the judgment pool
//! - whatever no picked sentence covers is split between the two direct games
//!
//! Greedy cover keeps planning cheap enough to rerun on every session reset.

mod coverage;

pub use coverage::CoverageIndex;

use std::collections::{BTreeSet, HashSet};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{ExampleSentence, Unit, VocabularyItem};
use crate::types::{DEFAULT_JUDGMENT_SLOTS, DEFAULT_SCRAMBLE_SLOTS};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerConfig {
    pub scramble_slots: usize,
    pub judgment_slots: usize,
    /// Lower bound on the size of each direct set, topped up with already-covered
    /// items when the unit has enough vocabulary. Zero disables topping up.
    pub direct_fill_minimum: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            scramble_slots: DEFAULT_SCRAMBLE_SLOTS,
            judgment_slots: DEFAULT_JUDGMENT_SLOTS,
            direct_fill_minimum: 0,
        }
    }
}

/// Content allocation for one play session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPlan {
    pub direct_set_a: Vec<VocabularyItem>,
    pub scramble_set: Vec<ExampleSentence>,
    pub direct_set_b: Vec<VocabularyItem>,
    pub judgment_set: Vec<ExampleSentence>,
}

impl SessionPlan {
    /// Term keys reachable from the four sets of this plan.
    pub fn covered_terms(&self, unit: &Unit) -> BTreeSet<String> {
        let index = CoverageIndex::new(unit);
        let mut covered = index.union(self.scramble_set.iter().chain(self.judgment_set.iter()));
        covered.extend(
            self.direct_set_a
                .iter()
                .chain(self.direct_set_b.iter())
                .map(VocabularyItem::key),
        );
        covered
    }

    /// Unit term keys this plan does not reach, sorted. Empty for a complete plan.
    pub fn validate(&self, unit: &Unit) -> Vec<String> {
        let covered = self.covered_terms(unit);
        let mut gaps: Vec<String> = unit
            .term_keys()
            .into_iter()
            .filter(|key| !covered.contains(key))
            .collect();
        gaps.sort();
        gaps
    }
}

/// A plan together with its coverage gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub unit_id: String,
    pub plan: SessionPlan,
    pub gaps: Vec<String>,
}

impl PlanReport {
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }
}

pub struct SessionPlanner {
    config: PlannerConfig,
    rng: ChaCha8Rng,
}

impl SessionPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        let seed = {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        };
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: PlannerConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn plan(&mut self, unit: &Unit) -> SessionPlan {
        self.plan_with_report(unit).plan
    }

    pub fn plan_with_report(&mut self, unit: &Unit) -> PlanReport {
        let index = CoverageIndex::new(unit);
        let mut uncovered: BTreeSet<String> = unit.term_keys().into_iter().collect();

        let mut scramble_set = greedy_cover(
            &index,
            &unit.scramble_sentences,
            self.config.scramble_slots,
            &mut uncovered,
            &mut self.rng,
        );
        let mut judgment_set = greedy_cover(
            &index,
            &unit.judgment_sentences,
            self.config.judgment_slots,
            &mut uncovered,
            &mut self.rng,
        );

        let (mut direct_set_a, mut direct_set_b) = self.split_direct(unit, &uncovered);

        scramble_set.shuffle(&mut self.rng);
        judgment_set.shuffle(&mut self.rng);
        direct_set_a.shuffle(&mut self.rng);
        direct_set_b.shuffle(&mut self.rng);

        let plan = SessionPlan {
            direct_set_a,
            scramble_set,
            direct_set_b,
            judgment_set,
        };

        let gaps = plan.validate(unit);
        if gaps.is_empty() {
            tracing::debug!(
                unit = %unit.id,
                scramble = plan.scramble_set.len(),
                judgment = plan.judgment_set.len(),
                direct_a = plan.direct_set_a.len(),
                direct_b = plan.direct_set_b.len(),
                "session plan built"
            );
        } else {
            tracing::warn!(unit = %unit.id, gaps = ?gaps, "session plan leaves vocabulary uncovered");
        }

        PlanReport {
            unit_id: unit.id.clone(),
            plan,
            gaps,
        }
    }

    fn split_direct(
        &mut self,
        unit: &Unit,
        uncovered: &BTreeSet<String>,
    ) -> (Vec<VocabularyItem>, Vec<VocabularyItem>) {
        let mut placed = HashSet::new();
        let mut remaining: Vec<VocabularyItem> = unit
            .vocabulary
            .iter()
            .filter(|item| {
                let key = item.key();
                uncovered.contains(&key) && placed.insert(key)
            })
            .cloned()
            .collect();
        remaining.shuffle(&mut self.rng);

        let half = remaining.len().div_ceil(2);
        let mut set_b = remaining.split_off(half);
        let mut set_a = remaining;

        let minimum = self.config.direct_fill_minimum;
        if minimum > 0 && (set_a.len() < minimum || set_b.len() < minimum) {
            let mut filler: Vec<VocabularyItem> = unit
                .vocabulary
                .iter()
                .filter(|item| {
                    let key = item.key();
                    !key.is_empty() && placed.insert(key)
                })
                .cloned()
                .collect();
            filler.shuffle(&mut self.rng);

            for set in [&mut set_a, &mut set_b] {
                while set.len() < minimum {
                    match filler.pop() {
                        Some(item) => set.push(item),
                        None => break,
                    }
                }
            }
        }

        (set_a, set_b)
    }
}

impl Default for SessionPlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

/// Greedy set cover over `pool`, picking at most `slots` sentences.
///
/// Each pick maximises the number of still-uncovered terms it covers; ties are broken
/// uniformly at random. Covered terms are removed from `uncovered`.
fn greedy_cover<R: Rng + ?Sized>(
    index: &CoverageIndex,
    pool: &[ExampleSentence],
    slots: usize,
    uncovered: &mut BTreeSet<String>,
    rng: &mut R,
) -> Vec<ExampleSentence> {
    let mut candidates: Vec<(&ExampleSentence, BTreeSet<String>)> =
        pool.iter().map(|s| (s, index.coverage(s))).collect();
    let mut picked = Vec::with_capacity(slots.min(pool.len()));

    while picked.len() < slots && !candidates.is_empty() {
        let gains: Vec<usize> = candidates
            .iter()
            .map(|(_, covered)| covered.intersection(uncovered).count())
            .collect();
        let best = gains.iter().copied().max().unwrap_or(0);
        let tied: Vec<usize> = gains
            .iter()
            .enumerate()
            .filter(|(_, gain)| **gain == best)
            .map(|(i, _)| i)
            .collect();

        let choice = tied.choose(rng).copied().unwrap_or(0);
        let (sentence, covered) = candidates.swap_remove(choice);
        for key in &covered {
            uncovered.remove(key);
        }
        picked.push(sentence.clone());
    }

    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(term: &str) -> VocabularyItem {
        VocabularyItem {
            term: term.to_string(),
            translation: format!("{term}-zh"),
            icon: String::new(),
            category: "test".to_string(),
        }
    }

    fn sentence(text: &str) -> ExampleSentence {
        ExampleSentence {
            text: text.to_string(),
            translation: String::new(),
            truth_value: None,
        }
    }

    fn terms(items: &[VocabularyItem]) -> BTreeSet<String> {
        items.iter().map(VocabularyItem::key).collect()
    }

    fn ten_term_unit(judgment: Vec<ExampleSentence>) -> Unit {
        Unit {
            id: "ten".to_string(),
            vocabulary: [
                "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
            ]
            .iter()
            .map(|t| item(t))
            .collect(),
            scramble_sentences: vec![
                sentence("one two three four"),
                sentence("three five"),
                sentence("six seven"),
            ],
            judgment_sentences: judgment,
        }
    }

    #[test]
    fn test_greedy_picks_maximal_coverage() {
        let unit = ten_term_unit(vec![]);
        let config = PlannerConfig {
            scramble_slots: 2,
            judgment_slots: 8,
            direct_fill_minimum: 0,
        };

        for seed in 0..20 {
            let plan = SessionPlanner::with_seed(config.clone(), seed).plan(&unit);
            let mut texts: Vec<&str> = plan.scramble_set.iter().map(|s| s.text.as_str()).collect();
            texts.sort();
            assert_eq!(texts, vec!["one two three four", "six seven"]);

            let direct: BTreeSet<String> = terms(&plan.direct_set_a)
                .union(&terms(&plan.direct_set_b))
                .cloned()
                .collect();
            let expected: BTreeSet<String> =
                ["five", "eight", "nine", "ten"].iter().map(|s| s.to_string()).collect();
            assert_eq!(direct, expected);
            assert_eq!(plan.direct_set_a.len(), 2);
            assert_eq!(plan.direct_set_b.len(), 2);
        }
    }

    #[test]
    fn test_judgment_continues_shrinking_uncovered() {
        let unit = ten_term_unit(vec![sentence("eight is true"), sentence("nothing here")]);
        let config = PlannerConfig {
            scramble_slots: 2,
            judgment_slots: 1,
            direct_fill_minimum: 0,
        };
        let plan = SessionPlanner::with_seed(config, 7).plan(&unit);

        assert_eq!(plan.judgment_set.len(), 1);
        assert_eq!(plan.judgment_set[0].text, "eight is true");
        let direct: BTreeSet<String> = terms(&plan.direct_set_a)
            .union(&terms(&plan.direct_set_b))
            .cloned()
            .collect();
        assert_eq!(direct.len(), 3);
        assert!(!direct.contains("eight"));
        assert_eq!(plan.direct_set_a.len(), 2);
        assert_eq!(plan.direct_set_b.len(), 1);
    }

    #[test]
    fn test_plan_covers_builtin_units() {
        let mut planner = SessionPlanner::with_seed(PlannerConfig::default(), 11);
        for unit in crate::catalog::Catalog::builtin().units() {
            let report = planner.plan_with_report(unit);
            assert!(report.is_complete(), "unit {} gaps {:?}", unit.id, report.gaps);
        }
    }

    #[test]
    fn test_slots_larger_than_pool() {
        let unit = ten_term_unit(vec![]);
        let config = PlannerConfig {
            scramble_slots: 10,
            judgment_slots: 10,
            direct_fill_minimum: 0,
        };
        let plan = SessionPlanner::with_seed(config, 3).plan(&unit);
        assert_eq!(plan.scramble_set.len(), 3);
        assert!(plan.judgment_set.is_empty());
        assert!(plan.validate(&unit).is_empty());
    }

    #[test]
    fn test_zero_slots_sends_everything_direct() {
        let unit = ten_term_unit(vec![]);
        let config = PlannerConfig {
            scramble_slots: 0,
            judgment_slots: 0,
            direct_fill_minimum: 0,
        };
        let plan = SessionPlanner::with_seed(config, 5).plan(&unit);
        assert!(plan.scramble_set.is_empty());
        assert_eq!(plan.direct_set_a.len() + plan.direct_set_b.len(), 10);
        assert_eq!(plan.direct_set_a.len(), 5);
    }

    #[test]
    fn test_direct_fill_minimum_tops_up_without_duplicates() {
        let unit = ten_term_unit(vec![]);
        let config = PlannerConfig {
            scramble_slots: 3,
            judgment_slots: 0,
            direct_fill_minimum: 3,
        };
        let plan = SessionPlanner::with_seed(config, 9).plan(&unit);
        assert_eq!(plan.direct_set_a.len(), 3);
        assert_eq!(plan.direct_set_b.len(), 3);

        let a = terms(&plan.direct_set_a);
        let b = terms(&plan.direct_set_b);
        assert!(a.is_disjoint(&b));
        assert!(plan.validate(&unit).is_empty());
    }

    #[test]
    fn test_duplicate_terms_placed_once() {
        let mut unit = ten_term_unit(vec![]);
        unit.vocabulary.push(item("NINE"));
        let config = PlannerConfig {
            scramble_slots: 0,
            judgment_slots: 0,
            direct_fill_minimum: 0,
        };
        let plan = SessionPlanner::with_seed(config, 1).plan(&unit);
        assert_eq!(plan.direct_set_a.len() + plan.direct_set_b.len(), 10);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let unit = ten_term_unit(vec![]);
        let plan = SessionPlanner::with_seed(PlannerConfig::default(), 2).plan(&unit);
        let first = plan.validate(&unit);
        let second = plan.validate(&unit);
        assert_eq!(first, second);
        assert!(first.is_empty());
    }

    #[test]
    fn test_validate_reports_gaps_for_foreign_plan() {
        let unit = ten_term_unit(vec![]);
        let plan = SessionPlan {
            scramble_set: vec![sentence("one two three four")],
            ..Default::default()
        };
        let gaps = plan.validate(&unit);
        assert_eq!(gaps.len(), 6);
        assert!(gaps.contains(&"ten".to_string()));
    }

    #[test]
    fn test_empty_unit() {
        let unit = Unit {
            id: "empty".to_string(),
            vocabulary: vec![],
            scramble_sentences: vec![sentence("hello there")],
            judgment_sentences: vec![],
        };
        let report = SessionPlanner::with_seed(PlannerConfig::default(), 0).plan_with_report(&unit);
        assert!(report.is_complete());
        assert!(report.plan.direct_set_a.is_empty());
        assert!(report.plan.direct_set_b.is_empty());
    }
}
