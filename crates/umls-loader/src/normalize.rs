//! Lexical normalization of surface strings.
//!
//! The lexical form of a string replaces every non-word character with a
//! space, lowercases, and collapses runs of whitespace. It is what makes
//! `"Hello, World!"` and `"hello world"` collide on lookup.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{RrfError, RrfResult};

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").expect("valid regex"));

/// A string's lexical form and word counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Lexical form of the input.
    pub lower: String,
    /// Whitespace token count of the input.
    pub numwords: usize,
    /// Whitespace token count of `lower`.
    pub numwordslower: usize,
}

impl Normalized {
    /// Normalizes `text`.
    pub fn new(text: &str) -> Self {
        let lower = lexical_form(text);
        Self {
            numwords: word_count(text),
            numwordslower: word_count(&lower),
            lower,
        }
    }
}

/// Returns the lexical form of `text`.
///
/// # Examples
///
/// ```
/// use umls_loader::normalize::lexical_form;
///
/// assert_eq!(lexical_form("Hello, World!"), "hello world");
/// assert_eq!(lexical_form("  Type-2   diabetes "), "type 2 diabetes");
/// assert_eq!(lexical_form("?!"), "");
/// ```
pub fn lexical_form(text: &str) -> String {
    let spaced = NON_WORD.replace_all(text, " ");
    spaced
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Counts whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Cuts `text` to at most `max_bytes` bytes of UTF-8.
///
/// Strings shorter than the budget are borrowed unchanged. Longer ones
/// are cut at the last character boundary inside the budget, so no
/// character is ever split.
///
/// # Errors
/// Returns `Truncation` if not even the first character fits.
///
/// # Examples
///
/// ```
/// use umls_loader::normalize::truncate_to_bytes;
///
/// assert_eq!(truncate_to_bytes("abcdef", 4).unwrap(), "abcd");
/// // "é" is two bytes and is never split.
/// assert_eq!(truncate_to_bytes("aé", 2).unwrap(), "a");
/// ```
pub fn truncate_to_bytes(text: &str, max_bytes: usize) -> RrfResult<Cow<'_, str>> {
    if text.len() < max_bytes {
        return Ok(Cow::Borrowed(text));
    }

    let mut cut = max_bytes.min(text.len());
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }

    if cut == 0 && !text.is_empty() {
        return Err(RrfError::Truncation { max_bytes });
    }
    Ok(Cow::Owned(text[..cut].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use umls_types::MAX_STRING_BYTES;

    #[test]
    fn test_normalized_counts() {
        let normalized = Normalized::new("Hello, World!");
        assert_eq!(normalized.lower, "hello world");
        assert_eq!(normalized.numwords, 2);
        assert_eq!(normalized.numwordslower, 2);
    }

    #[test]
    fn test_punctuation_splits_tokens() {
        let normalized = Normalized::new("beta-blocker/agent");
        assert_eq!(normalized.lower, "beta blocker agent");
        assert_eq!(normalized.numwords, 1);
        assert_eq!(normalized.numwordslower, 3);
    }

    #[test]
    fn test_word_only_input_is_lowercased() {
        assert_eq!(lexical_form("Acute Renal Failure"), "acute renal failure");
        assert_eq!(lexical_form("under_score 42"), "under_score 42");
    }

    #[test]
    fn test_punctuation_only_input_is_empty() {
        let normalized = Normalized::new("(--)!");
        assert_eq!(normalized.lower, "");
        assert_eq!(normalized.numwordslower, 0);
        assert_eq!(normalized.numwords, 1);
    }

    #[test]
    fn test_unicode_word_characters_survive() {
        assert_eq!(lexical_form("Maladie d'Alzheimer"), "maladie d alzheimer");
        assert_eq!(lexical_form("Ärztliche Überweisung"), "ärztliche überweisung");
    }

    #[test]
    fn test_short_strings_are_borrowed() {
        let text = "x".repeat(MAX_STRING_BYTES - 1);
        assert!(matches!(
            truncate_to_bytes(&text, MAX_STRING_BYTES).unwrap(),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_long_ascii_is_cut_exactly() {
        let text = "x".repeat(MAX_STRING_BYTES + 500);
        let cut = truncate_to_bytes(&text, MAX_STRING_BYTES).unwrap();
        assert_eq!(cut.len(), MAX_STRING_BYTES);
    }

    #[test]
    fn test_multibyte_boundary_is_respected() {
        // 999 ASCII bytes followed by a 3 byte character straddle the limit.
        let text = format!("{}€tail", "x".repeat(MAX_STRING_BYTES - 1));
        let cut = truncate_to_bytes(&text, MAX_STRING_BYTES).unwrap();
        assert_eq!(cut.len(), MAX_STRING_BYTES - 1);
        assert!(cut.chars().all(|c| c == 'x'));

        let wide = "漢".repeat(MAX_STRING_BYTES);
        let cut = truncate_to_bytes(&wide, MAX_STRING_BYTES).unwrap();
        assert!(cut.len() <= MAX_STRING_BYTES);
        assert_eq!(cut.len() % 3, 0);
    }

    #[test]
    fn test_budget_smaller_than_first_character() {
        assert!(matches!(
            truncate_to_bytes("€", 2),
            Err(RrfError::Truncation { max_bytes: 2 })
        ));
        assert_eq!(truncate_to_bytes("", 0).unwrap(), "");
    }
}
