//! UMLS String aggregate.
//!
//! This module provides `StringRecord`, the per-SUI document holding one
//! surface string together with its lexical normal form.

use crate::{Cui, Lui, Sui};

/// Largest encoded size, in bytes, allowed for a stored surface string.
///
/// Document stores cap the size of indexed keys, and `string` takes part
/// in the unique `(string, lower, lang)` index.
pub const MAX_STRING_BYTES: usize = 1000;

/// A string document keyed by SUI.
///
/// # Examples
///
/// ```
/// use umls_types::StringRecord;
///
/// let record = StringRecord {
///     sui: "S0047147".to_string(),
///     string: "Heart".to_string(),
///     lower: "heart".to_string(),
///     lang: "ENG".to_string(),
///     numwords: 1,
///     numwordslower: 1,
///     lui: "L0018787".to_string(),
///     cui_list: vec!["C0018787".to_string()],
/// };
///
/// assert!(record.fits_index());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringRecord {
    /// String unique identifier.
    #[cfg_attr(feature = "serde", serde(rename = "_id"))]
    pub sui: Sui,
    /// Surface string, at most [`MAX_STRING_BYTES`] bytes.
    pub string: String,
    /// Lexical form: punctuation replaced, lowercased, whitespace collapsed.
    pub lower: String,
    /// Vocabulary language code of the atom (e.g. `ENG`).
    pub lang: String,
    /// Whitespace token count of `string`.
    pub numwords: usize,
    /// Whitespace token count of `lower`.
    pub numwordslower: usize,
    /// LUI of the last accepted atom with this SUI.
    pub lui: Lui,
    /// CUIs of every accepted atom with this SUI.
    #[cfg_attr(feature = "serde", serde(rename = "cui", default))]
    pub cui_list: Vec<Cui>,
}

impl StringRecord {
    /// Returns true if `string` is within the index byte limit.
    pub fn fits_index(&self) -> bool {
        self.string.len() <= MAX_STRING_BYTES
    }
}
