//! Content Catalog
//!
//! Static, versioned content tables: vocabulary units with their example sentences, and
//! the math topic/category tables. Pure data; the only behaviour here is parsing and
//! authoring diagnostics.

pub mod math;

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::planner::CoverageIndex;
use crate::sanitize::term_key;

pub use math::{find_topic, topics, MathCategory, Topic};

const BUILTIN_ENGLISH_UNITS: &str = include_str!("../../data/english_units.json");

// ==================== Vocabulary Types ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub term: String,
    pub translation: String,
    pub icon: String,
    pub category: String,
}

impl VocabularyItem {
    /// Case-insensitive identity of this item within its unit.
    pub fn key(&self) -> String {
        term_key(&self.term)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleSentence {
    pub text: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truth_value: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub vocabulary: Vec<VocabularyItem>,
    #[serde(default)]
    pub scramble_sentences: Vec<ExampleSentence>,
    #[serde(default)]
    pub judgment_sentences: Vec<ExampleSentence>,
}

/// Authoring diagnostics for one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitCheck {
    /// Term keys that occur more than once
    pub duplicate_terms: Vec<String>,
    /// Number of items whose term is blank
    pub empty_terms: usize,
    /// Term keys no sentence mentions; these can only be reached through direct games
    pub sentence_uncoverable: Vec<String>,
}

impl UnitCheck {
    pub fn is_clean(&self) -> bool {
        self.duplicate_terms.is_empty() && self.empty_terms == 0
    }
}

impl Unit {
    /// Distinct term keys of the unit, in authoring order.
    pub fn term_keys(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.vocabulary
            .iter()
            .map(VocabularyItem::key)
            .filter(|key| !key.is_empty() && seen.insert(key.clone()))
            .collect()
    }

    pub fn item(&self, term: &str) -> Option<&VocabularyItem> {
        let key = term_key(term);
        self.vocabulary.iter().find(|item| item.key() == key)
    }

    pub fn check(&self) -> UnitCheck {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut empty_terms = 0;
        for item in &self.vocabulary {
            let key = item.key();
            if key.is_empty() {
                empty_terms += 1;
                continue;
            }
            *counts.entry(key).or_default() += 1;
        }

        let mut duplicate_terms: Vec<String> = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(key, _)| key)
            .collect();
        duplicate_terms.sort();

        let index = CoverageIndex::new(self);
        let mut sentence_uncoverable: Vec<String> = self
            .term_keys()
            .into_iter()
            .filter(|key| {
                !self
                    .scramble_sentences
                    .iter()
                    .chain(self.judgment_sentences.iter())
                    .any(|s| index.coverage(s).contains(key))
            })
            .collect();
        sentence_uncoverable.sort();

        UnitCheck {
            duplicate_terms,
            empty_terms,
            sentence_uncoverable,
        }
    }
}

// ==================== Catalog ====================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unit id must not be empty")]
    EmptyUnitId,
    #[error("duplicate unit id: {0}")]
    DuplicateUnit(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub version: String,
    pub units: Vec<Unit>,
}

/// Lightweight listing of what a catalog holds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogIndex {
    pub version: String,
    pub units: Vec<String>,
    pub topics: Vec<String>,
}

impl Catalog {
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.verify()?;

        for unit in &catalog.units {
            let check = unit.check();
            if !check.is_clean() {
                tracing::warn!(
                    unit = %unit.id,
                    duplicates = ?check.duplicate_terms,
                    empty_terms = check.empty_terms,
                    "unit has authoring defects"
                );
            }
            if !check.sentence_uncoverable.is_empty() {
                tracing::debug!(
                    unit = %unit.id,
                    terms = ?check.sentence_uncoverable,
                    "terms only reachable through direct games"
                );
            }
        }

        Ok(catalog)
    }

    /// The catalog compiled into the crate.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| match Catalog::from_json(BUILTIN_ENGLISH_UNITS) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::error!(error = %err, "built-in catalog failed to load");
                Catalog {
                    version: "empty".to_string(),
                    units: Vec::new(),
                }
            }
        })
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id.eq_ignore_ascii_case(id.trim()))
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn topic(&self, id: &str) -> Option<&'static Topic> {
        find_topic(id)
    }

    pub fn topics(&self) -> &'static [Topic] {
        topics()
    }

    pub fn index(&self) -> CatalogIndex {
        CatalogIndex {
            version: self.version.clone(),
            units: self.units.iter().map(|u| u.id.clone()).collect(),
            topics: topics().iter().map(|t| t.id.clone()).collect(),
        }
    }

    fn verify(&self) -> Result<(), CatalogError> {
        let mut ids = std::collections::HashSet::new();
        for unit in &self.units {
            let id = unit.id.trim().to_lowercase();
            if id.is_empty() {
                return Err(CatalogError::EmptyUnitId);
            }
            if !ids.insert(id) {
                return Err(CatalogError::DuplicateUnit(unit.id.clone()));
            }
        }
        Ok(())
    }
}
