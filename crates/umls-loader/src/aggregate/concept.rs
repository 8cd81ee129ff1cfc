//! Concept aggregation from MRCONSO, enriched by MRDEF, MRREL and MRSTY.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use umls_types::{Concept, Cui};

use crate::conso::ConsoAtom;
use crate::definition::{DefinitionFilter, DefinitionRow};
use crate::filter::LanguageFilter;
use crate::parser::Scanner;
use crate::preprocess::Preprocessor;
use crate::relation::RelationRow;
use crate::semantic_type::SemanticTypeRow;
use crate::types::{BuildConfig, PhaseStats, RrfResult};

/// Which enrichment fields new concepts carry.
///
/// An enabled field starts as an empty collection, so every concept of a
/// build has the same shape whether or not a row ever touched it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConceptShape {
    /// Concepts carry `definitions`.
    pub definitions: bool,
    /// Concepts carry `relations`.
    pub relations: bool,
    /// Concepts carry `semantic_types`.
    pub semantic_types: bool,
}

impl ConceptShape {
    /// Returns the shape implied by the enabled passes of `config`.
    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            definitions: config.process_definitions,
            relations: config.process_relations,
            semantic_types: config.process_semantic_types,
        }
    }

    fn blank(&self, cui: &Cui) -> Concept {
        Concept {
            cui: cui.clone(),
            definitions: self.definitions.then(Vec::new),
            relations: self.relations.then(BTreeMap::new),
            semantic_types: self.semantic_types.then(Vec::new),
            ..Default::default()
        }
    }
}

/// Builds [`Concept`] documents keyed by CUI.
///
/// The MRCONSO pass creates concepts; the enrichment passes append to
/// them and create a concept for any CUI they reference that MRCONSO
/// did not (for instance one whose atoms were all filtered out).
#[derive(Debug, Default)]
pub struct ConceptAggregator {
    concepts: HashMap<Cui, Concept>,
    shape: ConceptShape,
}

impl ConceptAggregator {
    /// Creates an empty aggregator producing concepts of `shape`.
    pub fn new(shape: ConceptShape) -> Self {
        Self {
            concepts: HashMap::new(),
            shape,
        }
    }

    /// Returns the concept for `cui`, creating it if absent.
    pub fn entry(&mut self, cui: Cui) -> &mut Concept {
        let shape = self.shape;
        self.concepts
            .entry(cui)
            .or_insert_with_key(|cui| shape.blank(cui))
    }

    /// Adds one atom's LUI and SUI; a preferred atom also sets the
    /// preferred LUI.
    pub fn add_atom(&mut self, atom: ConsoAtom) {
        let preferred = atom.is_preferred();
        let concept = self.entry(atom.cui);
        if preferred {
            concept.preferred_lui = Some(atom.lui.clone());
        }
        concept.lui_list.push(atom.lui);
        concept.sui_list.push(atom.sui);
    }

    /// Appends a definition to its concept.
    pub fn add_definition(&mut self, cui: Cui, definition: String) {
        self.entry(cui)
            .definitions
            .get_or_insert_with(Vec::new)
            .push(definition);
    }

    /// Records a relation on its subject concept.
    pub fn add_relation(&mut self, row: RelationRow) {
        self.entry(row.subject_cui)
            .relations
            .get_or_insert_with(BTreeMap::new)
            .entry(row.kind)
            .or_default()
            .push(row.object_cui);
    }

    /// Appends a semantic type to its concept.
    pub fn add_semantic_type(&mut self, row: SemanticTypeRow) {
        self.entry(row.cui)
            .semantic_types
            .get_or_insert_with(Vec::new)
            .push(row.semantic_type);
    }

    /// Streams MRCONSO, adding every atom that passes `filter`.
    pub fn load_atoms(
        &mut self,
        path: &Path,
        filter: &LanguageFilter,
        scanner: &mut Scanner<'_>,
    ) -> RrfResult<PhaseStats> {
        scanner.scan("concepts", path, |atom: ConsoAtom| {
            if !filter.accepts(&atom.language) {
                return Ok(false);
            }
            self.add_atom(atom);
            Ok(true)
        })
    }

    /// Streams MRDEF, adding each definition in an accepted language
    /// after running it through `preprocessor`.
    pub fn load_definitions(
        &mut self,
        path: &Path,
        filter: &DefinitionFilter<'_>,
        preprocessor: &dyn Preprocessor,
        scanner: &mut Scanner<'_>,
    ) -> RrfResult<PhaseStats> {
        scanner.scan("definitions", path, |row: DefinitionRow| {
            if !filter.accepts(&row.text) {
                return Ok(false);
            }
            self.add_definition(row.cui, preprocessor.process(&row.text));
            Ok(true)
        })
    }

    /// Streams MRREL, adding every relation.
    pub fn load_relations(&mut self, path: &Path, scanner: &mut Scanner<'_>) -> RrfResult<PhaseStats> {
        scanner.scan("relations", path, |row: RelationRow| {
            self.add_relation(row);
            Ok(true)
        })
    }

    /// Streams MRSTY, adding every semantic type.
    pub fn load_semantic_types(
        &mut self,
        path: &Path,
        scanner: &mut Scanner<'_>,
    ) -> RrfResult<PhaseStats> {
        scanner.scan("semantic types", path, |row: SemanticTypeRow| {
            self.add_semantic_type(row);
            Ok(true)
        })
    }

    /// Returns the concept for `cui`.
    pub fn get(&self, cui: &str) -> Option<&Concept> {
        self.concepts.get(cui)
    }

    /// Returns the number of concepts.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Returns true if no concept has been created.
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Consumes the aggregator, returning its concepts.
    pub fn into_concepts(self) -> HashMap<Cui, Concept> {
        self.concepts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umls_types::RelationKind;

    fn atom(cui: &str, status: &str, lui: &str, sui: &str) -> ConsoAtom {
        ConsoAtom {
            cui: cui.to_string(),
            language: "ENG".to_string(),
            term_status: status.to_string(),
            lui: lui.to_string(),
            sui: sui.to_string(),
            string: String::new(),
        }
    }

    fn relation(subject: &str, kind: RelationKind, object: &str) -> RelationRow {
        RelationRow {
            subject_cui: subject.to_string(),
            kind,
            object_cui: object.to_string(),
        }
    }

    #[test]
    fn test_atoms_build_concept() {
        let mut concepts = ConceptAggregator::default();
        concepts.add_atom(atom("C001", "P", "L001", "S001"));
        concepts.add_atom(atom("C001", "S", "L002", "S002"));

        let concept = concepts.get("C001").unwrap();
        assert_eq!(concept.preferred_lui.as_deref(), Some("L001"));
        assert_eq!(concept.lui_list, vec!["L001", "L002"]);
        assert_eq!(concept.sui_list, vec!["S001", "S002"]);
        assert!(concept.preferred_is_listed());
    }

    #[test]
    fn test_last_preferred_atom_wins() {
        let mut concepts = ConceptAggregator::default();
        concepts.add_atom(atom("C001", "P", "L001", "S001"));
        concepts.add_atom(atom("C001", "P", "L003", "S003"));

        let concept = concepts.get("C001").unwrap();
        assert_eq!(concept.preferred_lui.as_deref(), Some("L003"));
    }

    #[test]
    fn test_shape_controls_enrichment_fields() {
        let shape = ConceptShape {
            definitions: true,
            relations: false,
            semantic_types: true,
        };
        let mut concepts = ConceptAggregator::new(shape);
        concepts.add_atom(atom("C001", "S", "L001", "S001"));

        let concept = concepts.get("C001").unwrap();
        assert_eq!(concept.definitions, Some(vec![]));
        assert_eq!(concept.relations, None);
        assert_eq!(concept.semantic_types, Some(vec![]));
    }

    #[test]
    fn test_relations_group_by_kind() {
        let shape = ConceptShape {
            relations: true,
            ..Default::default()
        };
        let mut concepts = ConceptAggregator::new(shape);
        concepts.add_relation(relation("C001", RelationKind::Parent, "C002"));
        concepts.add_relation(relation("C001", RelationKind::Parent, "C003"));
        concepts.add_relation(relation("C001", RelationKind::Sibling, "C004"));

        let concept = concepts.get("C001").unwrap();
        assert_eq!(concept.related(RelationKind::Parent), ["C002", "C003"]);
        assert_eq!(concept.related(RelationKind::Sibling), ["C004"]);
        assert!(concept.lui_list.is_empty());
    }

    #[test]
    fn test_enrichment_creates_missing_concepts() {
        let mut concepts = ConceptAggregator::new(ConceptShape {
            definitions: true,
            relations: true,
            semantic_types: true,
        });
        concepts.add_definition("C009".to_string(), "A definition.".to_string());
        concepts.add_semantic_type(SemanticTypeRow {
            cui: "C010".to_string(),
            semantic_type: "A1.2".to_string(),
        });

        assert_eq!(concepts.len(), 2);
        let defined = concepts.get("C009").unwrap();
        assert_eq!(defined.definitions, Some(vec!["A definition.".to_string()]));
        assert_eq!(defined.relations, Some(BTreeMap::new()));
        assert_eq!(
            concepts.get("C010").unwrap().semantic_types,
            Some(vec!["A1.2".to_string()])
        );
    }
}
