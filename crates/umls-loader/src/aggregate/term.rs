//! Term aggregation from MRCONSO.

use std::collections::HashMap;
use std::path::Path;

use umls_types::{Lui, Term};

use crate::conso::ConsoAtom;
use crate::filter::LanguageFilter;
use crate::parser::Scanner;
use crate::types::{PhaseStats, RrfResult};

/// Builds [`Term`] documents keyed by LUI.
#[derive(Debug, Default)]
pub struct TermAggregator {
    terms: HashMap<Lui, Term>,
}

impl TermAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one atom's CUI and SUI to its term.
    pub fn add_atom(&mut self, atom: ConsoAtom) {
        let term = self
            .terms
            .entry(atom.lui)
            .or_insert_with_key(|lui| Term::new(lui.clone()));
        term.cui_list.push(atom.cui);
        term.sui_list.push(atom.sui);
    }

    /// Streams MRCONSO, adding every atom that passes `filter`.
    pub fn load_atoms(
        &mut self,
        path: &Path,
        filter: &LanguageFilter,
        scanner: &mut Scanner<'_>,
    ) -> RrfResult<PhaseStats> {
        scanner.scan("terms", path, |atom: ConsoAtom| {
            if !filter.accepts(&atom.language) {
                return Ok(false);
            }
            self.add_atom(atom);
            Ok(true)
        })
    }

    /// Returns the term for `lui`.
    pub fn get(&self, lui: &str) -> Option<&Term> {
        self.terms.get(lui)
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if no term has been created.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Consumes the aggregator, returning its terms.
    pub fn into_terms(self) -> HashMap<Lui, Term> {
        self.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(cui: &str, lui: &str, sui: &str) -> ConsoAtom {
        ConsoAtom {
            cui: cui.to_string(),
            language: "ENG".to_string(),
            term_status: "S".to_string(),
            lui: lui.to_string(),
            sui: sui.to_string(),
            string: String::new(),
        }
    }

    #[test]
    fn test_term_collects_references() {
        let mut terms = TermAggregator::new();
        terms.add_atom(atom("C001", "L001", "S001"));
        terms.add_atom(atom("C002", "L001", "S002"));
        terms.add_atom(atom("C001", "L002", "S003"));

        assert_eq!(terms.len(), 2);
        let term = terms.get("L001").unwrap();
        assert_eq!(term.lui, "L001");
        assert_eq!(term.cui_list, vec!["C001", "C002"]);
        assert_eq!(term.sui_list, vec!["S001", "S002"]);
    }

    #[test]
    fn test_repeated_rows_are_not_deduplicated() {
        let mut terms = TermAggregator::new();
        terms.add_atom(atom("C001", "L001", "S001"));
        terms.add_atom(atom("C001", "L001", "S001"));

        let term = terms.get("L001").unwrap();
        assert_eq!(term.cui_list, vec!["C001", "C001"]);
        assert_eq!(term.sui_list, vec!["S001", "S001"]);
    }
}
