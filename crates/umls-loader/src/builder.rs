//! Table building: the full MRCONSO/MRDEF/MRREL/MRSTY pipeline.
//!
//! ```ignore
//! use umls_loader::{BuildConfig, JsonlSink, SinkConfig, TableBuilder};
//!
//! let config = BuildConfig::english_only("/data/2024AA/META");
//! let sink_config = SinkConfig::default();
//! let mut sink = JsonlSink::open(&sink_config)?;
//!
//! let tables = TableBuilder::new(config).build(&mut sink)?;
//! tables.write_to(&mut sink, sink_config.batch_size)?;
//! ```

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};
use umls_types::{Concept, Cui, Lui, StringRecord, Sui, Term};

use crate::aggregate::{ConceptAggregator, ConceptShape, StringAggregator, TermAggregator};
use crate::definition::{DefinitionFilter, LanguageClassifier, WhatlangClassifier};
use crate::filter::LanguageFilter;
use crate::loader::{discover_rrf_files, CONSO_FILE};
use crate::parser::Scanner;
use crate::preprocess::{Identity, Preprocessor};
use crate::progress::{NoProgress, Progress};
use crate::sink::DocumentSink;
use crate::types::{BuildConfig, BuildStats, RrfResult};

/// Collection holding concepts.
pub const CONCEPT_COLLECTION: &str = "concept";
/// Collection holding terms.
pub const TERM_COLLECTION: &str = "term";
/// Collection holding strings.
pub const STRING_COLLECTION: &str = "string";
/// Fields of the unique index on the string collection.
pub const STRING_INDEX: [&str; 3] = ["string", "lower", "lang"];

/// The finished tables of a build.
#[derive(Debug, Default)]
pub struct UmlsTables {
    /// Concepts keyed by CUI.
    pub concepts: HashMap<Cui, Concept>,
    /// Terms keyed by LUI.
    pub terms: HashMap<Lui, Term>,
    /// Strings keyed by SUI.
    pub strings: HashMap<Sui, StringRecord>,
    /// Row counts per scan.
    pub stats: BuildStats,
}

impl UmlsTables {
    /// Inserts all three tables into `sink` in batches of `batch_size`.
    ///
    /// Returns the number of documents inserted.
    pub fn write_to(&self, sink: &mut dyn DocumentSink, batch_size: usize) -> RrfResult<usize> {
        let mut total = 0;
        total += insert_batched(sink, CONCEPT_COLLECTION, self.concepts.values(), batch_size)?;
        total += insert_batched(sink, TERM_COLLECTION, self.terms.values(), batch_size)?;
        total += insert_batched(sink, STRING_COLLECTION, self.strings.values(), batch_size)?;
        Ok(total)
    }
}

fn insert_batched<'a, T, I>(
    sink: &mut dyn DocumentSink,
    collection: &str,
    documents: I,
    batch_size: usize,
) -> RrfResult<usize>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let batch_size = batch_size.max(1);
    let mut batch = Vec::with_capacity(batch_size);
    let mut total = 0;

    for document in documents {
        batch.push(serde_json::to_value(document)?);
        if batch.len() >= batch_size {
            total += sink.insert_many(collection, std::mem::take(&mut batch))?;
        }
    }

    // Insert remaining documents
    if !batch.is_empty() {
        total += sink.insert_many(collection, batch)?;
    }

    info!(collection, documents = total, "Inserted documents");
    Ok(total)
}

/// Builds concept, term and string tables from a META directory.
///
/// Phases run one after another, each a full scan of its file: terms,
/// strings and concepts from MRCONSO, then definitions, relations and
/// semantic types as enabled.
pub struct TableBuilder<'a> {
    config: BuildConfig,
    classifier: Box<dyn LanguageClassifier + 'a>,
    preprocessor: Box<dyn Preprocessor + 'a>,
    progress: Box<dyn Progress + 'a>,
}

impl<'a> TableBuilder<'a> {
    /// Creates a builder with the default classifier, no preprocessing
    /// and no progress output.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            classifier: Box::new(WhatlangClassifier),
            preprocessor: Box::new(Identity),
            progress: Box::new(NoProgress),
        }
    }

    /// Sets the classifier used to detect definition languages.
    pub fn with_classifier(mut self, classifier: impl LanguageClassifier + 'a) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Sets the transform applied to accepted definitions.
    pub fn with_preprocessor(mut self, preprocessor: impl Preprocessor + 'a) -> Self {
        self.preprocessor = Box::new(preprocessor);
        self
    }

    /// Sets the progress receiver for every scan.
    pub fn with_progress(mut self, progress: impl Progress + 'a) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Returns the build configuration.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Runs every phase and declares the string index on `sink`.
    ///
    /// Languages are validated before any file is touched.
    pub fn build(mut self, sink: &mut dyn DocumentSink) -> RrfResult<UmlsTables> {
        let accepted_iso = self.config.validate()?;

        let files = discover_rrf_files(&self.config.meta_dir)?;
        files.require(&self.config)?;
        let conso_path = files.meta_dir.join(CONSO_FILE);

        let filter = LanguageFilter::new(self.config.languages.iter().cloned());
        let mut scanner = Scanner::new(self.progress.as_mut(), self.config.progress_unit);
        let mut stats = BuildStats::default();

        let mut terms = TermAggregator::new();
        stats.terms = terms.load_atoms(&conso_path, &filter, &mut scanner)?;
        info!("Built {} terms", terms.len());

        let mut strings = StringAggregator::new();
        stats.strings = strings.load_atoms(&conso_path, &filter, &mut scanner)?;
        info!("Built {} strings", strings.len());

        let mut concepts = ConceptAggregator::new(ConceptShape::from_config(&self.config));
        stats.concepts = concepts.load_atoms(&conso_path, &filter, &mut scanner)?;
        info!("Built {} concepts", concepts.len());

        if let (true, Some(path)) = (self.config.process_definitions, &files.definition_file) {
            let definitions = DefinitionFilter::new(self.classifier.as_ref(), accepted_iso);
            let phase = concepts.load_definitions(
                path,
                &definitions,
                self.preprocessor.as_ref(),
                &mut scanner,
            )?;
            info!(
                "Added {} definitions ({} rejected by language)",
                phase.rows_accepted,
                phase.rows_skipped()
            );
            stats.definitions = Some(phase);
        }

        if let (true, Some(path)) = (self.config.process_relations, &files.relation_file) {
            let phase = concepts.load_relations(path, &mut scanner)?;
            info!("Added {} relations", phase.rows_accepted);
            stats.relations = Some(phase);
        }

        if let (true, Some(path)) = (self.config.process_semantic_types, &files.semantic_type_file) {
            let phase = concepts.load_semantic_types(path, &mut scanner)?;
            info!("Added {} semantic types", phase.rows_accepted);
            stats.semantic_types = Some(phase);
        }

        sink.create_unique_index(STRING_COLLECTION, &STRING_INDEX)?;
        debug!(collection = STRING_COLLECTION, fields = ?STRING_INDEX, "Requested unique index");

        info!(
            "Built {} concepts, {} terms, {} strings",
            concepts.len(),
            terms.len(),
            strings.len()
        );

        Ok(UmlsTables {
            concepts: concepts.into_concepts(),
            terms: terms.into_terms(),
            strings: strings.into_strings(),
            stats,
        })
    }
}
