//! Word records and the indexable-word rule.
//!
//! The index only stores words over the 26 lowercase Latin letters. Callers
//! are expected to normalize their input first (see [`crate::ingest`]); the
//! trie treats anything else as a word it does not know.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A word together with its usage counter.
///
/// Ordered by rank: a record is *greater* when it has more importance, and on
/// equal importance when its word sorts first alphabetically. The greatest
/// record is therefore the best result and the least one is what a bounded
/// collector evicts first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordImportance {
    pub word: String,
    pub importance: u32,
}

impl WordImportance {
    pub fn new(word: impl Into<String>, importance: u32) -> Self {
        Self {
            word: word.into(),
            importance,
        }
    }
}

impl Ord for WordImportance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.importance
            .cmp(&other.importance)
            .then_with(|| other.word.cmp(&self.word))
    }
}

impl PartialOrd for WordImportance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordError {
    #[error("empty word")]
    Empty,
    #[error("invalid character {ch:?} in {word:?} (expected a-z)")]
    InvalidChar { word: String, ch: char },
    #[error("word is {len} letters long (max {max})")]
    TooLong { len: usize, max: usize },
}

/// True if `s` is a non-empty run of `a-z`.
#[inline]
pub fn is_indexable(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase())
}

/// Check that `word` can be stored, reporting the first problem found.
pub fn validate(word: &str, max_len: usize) -> Result<(), WordError> {
    if word.is_empty() {
        return Err(WordError::Empty);
    }
    if let Some(ch) = word.chars().find(|c| !c.is_ascii_lowercase()) {
        return Err(WordError::InvalidChar {
            word: word.to_string(),
            ch,
        });
    }
    if word.len() > max_len {
        return Err(WordError::TooLong {
            len: word.len(),
            max: max_len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_importance_ranks_above() {
        let a = WordImportance::new("zebra", 5);
        let b = WordImportance::new("apple", 2);
        assert!(a > b);
    }

    #[test]
    fn test_tie_prefers_alphabetically_first() {
        let a = WordImportance::new("apple", 3);
        let b = WordImportance::new("banana", 3);
        assert!(a > b);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_sort_descending_by_rank() {
        let mut v = vec![
            WordImportance::new("bell", 1),
            WordImportance::new("bear", 3),
            WordImportance::new("be", 3),
            WordImportance::new("bid", 0),
        ];
        v.sort_by(|a, b| b.cmp(a));
        let words: Vec<&str> = v.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["be", "bear", "bell", "bid"]);
    }

    #[test]
    fn test_is_indexable() {
        assert!(is_indexable("stock"));
        assert!(!is_indexable(""));
        assert!(!is_indexable("Stock"));
        assert!(!is_indexable("don't"));
        assert!(!is_indexable("café"));
    }

    #[test]
    fn test_validate_errors() {
        assert_eq!(validate("", 10), Err(WordError::Empty));
        assert!(matches!(
            validate("ab1", 10),
            Err(WordError::InvalidChar { ch: '1', .. })
        ));
        assert_eq!(
            validate("abcdef", 3),
            Err(WordError::TooLong { len: 6, max: 3 })
        );
        assert_eq!(validate("abc", 3), Ok(()));
    }
}
