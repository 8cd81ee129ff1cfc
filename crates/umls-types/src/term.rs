//! UMLS Term aggregate.

use crate::{Cui, Lui, Sui};

/// A term document keyed by LUI.
///
/// # Examples
///
/// ```
/// use umls_types::Term;
///
/// let term = Term::new("L0018787");
/// assert_eq!(term.lui, "L0018787");
/// assert!(term.cui_list.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    /// Lexical unique identifier.
    #[cfg_attr(feature = "serde", serde(rename = "_id"))]
    pub lui: Lui,
    /// CUIs of every accepted atom carrying this LUI.
    #[cfg_attr(feature = "serde", serde(rename = "cui", default))]
    pub cui_list: Vec<Cui>,
    /// SUIs of every accepted atom carrying this LUI.
    #[cfg_attr(feature = "serde", serde(rename = "sui", default))]
    pub sui_list: Vec<Sui>,
}

impl Term {
    /// Creates a term with no references.
    pub fn new(lui: impl Into<Lui>) -> Self {
        Self {
            lui: lui.into(),
            ..Default::default()
        }
    }
}
