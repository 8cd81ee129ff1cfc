//! String aggregation from MRCONSO.

use std::collections::HashMap;
use std::path::Path;

use umls_types::{StringRecord, Sui, MAX_STRING_BYTES};

use crate::conso::ConsoAtom;
use crate::filter::LanguageFilter;
use crate::normalize::{truncate_to_bytes, Normalized};
use crate::parser::Scanner;
use crate::types::{PhaseStats, RrfResult};

/// Builds [`StringRecord`] documents keyed by SUI.
///
/// Scalar fields are overwritten by every atom carrying the SUI, so the
/// last accepted atom decides `lui` and `lang`.
#[derive(Debug, Default)]
pub struct StringAggregator {
    strings: HashMap<Sui, StringRecord>,
}

impl StringAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one atom to its string.
    ///
    /// # Errors
    /// Returns `Truncation` if the surface string cannot be cut to
    /// [`MAX_STRING_BYTES`].
    pub fn add_atom(&mut self, atom: ConsoAtom) -> RrfResult<()> {
        let string = truncate_to_bytes(&atom.string, MAX_STRING_BYTES)?.into_owned();
        let normalized = Normalized::new(&string);

        let record = self
            .strings
            .entry(atom.sui)
            .or_insert_with_key(|sui| StringRecord {
                sui: sui.clone(),
                ..Default::default()
            });
        record.string = string;
        record.lower = normalized.lower;
        record.lang = atom.language;
        record.numwords = normalized.numwords;
        record.numwordslower = normalized.numwordslower;
        record.lui = atom.lui;
        record.cui_list.push(atom.cui);
        Ok(())
    }

    /// Streams MRCONSO, adding every atom that passes `filter`.
    pub fn load_atoms(
        &mut self,
        path: &Path,
        filter: &LanguageFilter,
        scanner: &mut Scanner<'_>,
    ) -> RrfResult<PhaseStats> {
        scanner.scan("strings", path, |atom: ConsoAtom| {
            if !filter.accepts(&atom.language) {
                return Ok(false);
            }
            self.add_atom(atom)?;
            Ok(true)
        })
    }

    /// Returns the string for `sui`.
    pub fn get(&self, sui: &str) -> Option<&StringRecord> {
        self.strings.get(sui)
    }

    /// Returns the number of strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if no string has been created.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Consumes the aggregator, returning its strings.
    pub fn into_strings(self) -> HashMap<Sui, StringRecord> {
        self.strings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(cui: &str, lui: &str, sui: &str, string: &str) -> ConsoAtom {
        ConsoAtom {
            cui: cui.to_string(),
            language: "ENG".to_string(),
            term_status: "P".to_string(),
            lui: lui.to_string(),
            sui: sui.to_string(),
            string: string.to_string(),
        }
    }

    #[test]
    fn test_string_record_fields() {
        let mut strings = StringAggregator::new();
        strings
            .add_atom(atom("C001", "L001", "S001", "Hello, World!"))
            .unwrap();

        let record = strings.get("S001").unwrap();
        assert_eq!(record.sui, "S001");
        assert_eq!(record.string, "Hello, World!");
        assert_eq!(record.lower, "hello world");
        assert_eq!(record.lang, "ENG");
        assert_eq!(record.numwords, 2);
        assert_eq!(record.numwordslower, 2);
        assert_eq!(record.lui, "L001");
        assert_eq!(record.cui_list, vec!["C001"]);
    }

    #[test]
    fn test_last_atom_wins_for_scalars() {
        let mut strings = StringAggregator::new();
        strings.add_atom(atom("C001", "L001", "S001", "Heart")).unwrap();
        strings.add_atom(atom("C002", "L009", "S001", "Heart")).unwrap();

        let record = strings.get("S001").unwrap();
        assert_eq!(record.lui, "L009");
        assert_eq!(record.cui_list, vec!["C001", "C002"]);
    }

    #[test]
    fn test_long_strings_are_truncated() {
        let long = format!("{} é", "word ".repeat(250));
        let mut strings = StringAggregator::new();
        strings.add_atom(atom("C001", "L001", "S001", &long)).unwrap();

        let record = strings.get("S001").unwrap();
        assert!(record.fits_index());
        assert_eq!(record.string.len(), MAX_STRING_BYTES);
        assert_eq!(record.lower, crate::normalize::lexical_form(&record.string));
    }
}
