//! Text Sanitization
//!
//! Normalisation utilities shared by the catalog and the session planner.
//!
//! Functions:
//! - Term keys (case-insensitive identity of a vocabulary item)
//! - Tokenisation of sentences into lowercase word tokens
//! - Whole-word / whole-phrase containment on token sequences

/// Case-insensitive key identifying a vocabulary term within a unit.
///
/// Inner whitespace is collapsed so `"ice  cream"` and `"Ice cream"` share a key.
pub fn term_key(term: &str) -> String {
    tokenize(term).join(" ")
}

/// Split text into lowercase word tokens.
///
/// A token is a maximal run of alphanumeric characters; an apostrophe between two
/// alphanumeric characters stays inside the token (`"don't"`, `"Tom's"`).
pub fn tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphanumeric() {
            current.extend(c.to_lowercase());
            continue;
        }

        let is_inner_apostrophe = (c == '\'' || c == '’')
            && !current.is_empty()
            && chars.get(i + 1).is_some_and(|next| next.is_alphanumeric());
        if is_inner_apostrophe {
            current.push('\'');
            continue;
        }

        if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Whether `phrase` occurs in `haystack` as a contiguous run of whole tokens.
pub fn contains_phrase(haystack: &[String], phrase: &[String]) -> bool {
    if phrase.is_empty() || phrase.len() > haystack.len() {
        return false;
    }
    haystack.windows(phrase.len()).any(|window| window == phrase)
}

/// Whether `term` appears in `text` as a whole word or whole multi-word phrase.
pub fn text_mentions(text: &str, term: &str) -> bool {
    contains_phrase(&tokenize(text), &tokenize(term))
}

/// Trim a free-text label and reject it when nothing is left.
pub fn clean_label(label: &str) -> Option<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
