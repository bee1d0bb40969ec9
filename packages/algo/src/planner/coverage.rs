//! Sentence coverage.
//!
//! A sentence covers every vocabulary term that appears in it as a whole word or a
//! whole multi-word phrase. Term token sequences are computed once per unit.

use std::collections::BTreeSet;

use crate::catalog::{ExampleSentence, Unit};
use crate::sanitize::{contains_phrase, tokenize};

/// Pre-tokenised vocabulary of one unit.
#[derive(Debug, Clone)]
pub struct CoverageIndex {
    terms: Vec<(String, Vec<String>)>,
}

impl CoverageIndex {
    pub fn new(unit: &Unit) -> Self {
        let mut seen = BTreeSet::new();
        let terms = unit
            .vocabulary
            .iter()
            .filter_map(|item| {
                let tokens = tokenize(&item.term);
                let key = tokens.join(" ");
                if tokens.is_empty() || !seen.insert(key.clone()) {
                    return None;
                }
                Some((key, tokens))
            })
            .collect();
        Self { terms }
    }

    /// Term keys covered by `sentence`.
    pub fn coverage(&self, sentence: &ExampleSentence) -> BTreeSet<String> {
        let tokens = tokenize(&sentence.text);
        self.terms
            .iter()
            .filter(|(_, term_tokens)| contains_phrase(&tokens, term_tokens))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Union of the coverage of every sentence in `sentences`.
    pub fn union<'a, I>(&self, sentences: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a ExampleSentence>,
    {
        sentences
            .into_iter()
            .flat_map(|s| self.coverage(s))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VocabularyItem;

    fn unit(terms: &[&str]) -> Unit {
        Unit {
            id: "t".to_string(),
            vocabulary: terms
                .iter()
                .map(|t| VocabularyItem {
                    term: t.to_string(),
                    translation: String::new(),
                    icon: String::new(),
                    category: String::new(),
                })
                .collect(),
            scramble_sentences: vec![],
            judgment_sentences: vec![],
        }
    }

    fn sentence(text: &str) -> ExampleSentence {
        ExampleSentence {
            text: text.to_string(),
            translation: String::new(),
            truth_value: None,
        }
    }

    #[test]
    fn test_coverage_whole_words_and_phrases() {
        let index = CoverageIndex::new(&unit(&["cat", "hot dog", "dog"]));
        let covered = index.coverage(&sentence("My cat ate a hot dog."));
        assert_eq!(
            covered.into_iter().collect::<Vec<_>>(),
            vec!["cat", "dog", "hot dog"]
        );
    }

    #[test]
    fn test_coverage_ignores_substrings() {
        let index = CoverageIndex::new(&unit(&["cat"]));
        assert!(index.coverage(&sentence("A category of things.")).is_empty());
    }

    #[test]
    fn test_index_skips_duplicates_and_blanks() {
        let index = CoverageIndex::new(&unit(&["Cat", "cat", " "]));
        assert_eq!(index.len(), 1);
    }
}
