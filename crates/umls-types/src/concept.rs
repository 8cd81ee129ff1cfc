//! UMLS Concept aggregate.
//!
//! This module provides the `Concept` struct, the per-CUI document built
//! from MRCONSO and optionally enriched from MRDEF, MRREL and MRSTY.

use std::collections::BTreeMap;

use crate::{Cui, Lui, RelationKind, Sui};

/// A concept document keyed by CUI.
///
/// List fields keep every reference in file order; repeated rows produce
/// repeated entries. The three enrichment fields are `None` when their
/// pass was disabled and `Some` (possibly empty) when it ran.
///
/// # Examples
///
/// ```
/// use umls_types::Concept;
///
/// let mut concept = Concept::new("C0018787");
/// concept.lui_list.push("L0018787".to_string());
/// concept.preferred_lui = Some("L0018787".to_string());
///
/// assert!(concept.preferred_is_listed());
/// assert!(concept.relations.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concept {
    /// Concept unique identifier.
    #[cfg_attr(feature = "serde", serde(rename = "_id"))]
    pub cui: Cui,
    /// LUI of the last preferred (`TS = P`) atom seen.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "preferred", default, skip_serializing_if = "Option::is_none")
    )]
    pub preferred_lui: Option<Lui>,
    /// LUIs of every accepted atom of this concept.
    #[cfg_attr(feature = "serde", serde(rename = "lui", default))]
    pub lui_list: Vec<Lui>,
    /// SUIs of every accepted atom of this concept.
    #[cfg_attr(feature = "serde", serde(rename = "sui", default))]
    pub sui_list: Vec<Sui>,
    /// Related CUIs grouped by relation name.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "rel", default, skip_serializing_if = "Option::is_none")
    )]
    pub relations: Option<BTreeMap<RelationKind, Vec<Cui>>>,
    /// Definitions whose detected language was accepted.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "definition", default, skip_serializing_if = "Option::is_none")
    )]
    pub definitions: Option<Vec<String>>,
    /// Semantic type tree numbers (`STN`, column 2) from MRSTY.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "semtype", default, skip_serializing_if = "Option::is_none")
    )]
    pub semantic_types: Option<Vec<String>>,
}

impl Concept {
    /// Creates an empty concept with no enrichment fields.
    pub fn new(cui: impl Into<Cui>) -> Self {
        Self {
            cui: cui.into(),
            ..Default::default()
        }
    }

    /// Returns the CUIs related through `kind`, or an empty slice.
    pub fn related(&self, kind: RelationKind) -> &[Cui] {
        self.relations
            .as_ref()
            .and_then(|relations| relations.get(&kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns true if the preferred LUI is unset or present in `lui_list`.
    pub fn preferred_is_listed(&self) -> bool {
        match &self.preferred_lui {
            Some(lui) => self.lui_list.contains(lui),
            None => true,
        }
    }
}
