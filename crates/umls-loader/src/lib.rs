//! # umls-loader
//!
//! Streaming parser and aggregator for UMLS Rich Release Format files.
//!
//! Reads `MRCONSO.RRF` into concept, term and string tables, then
//! optionally enriches concepts with definitions (`MRDEF.RRF`),
//! relations (`MRREL.RRF`) and semantic types (`MRSTY.RRF`). Files are
//! streamed row by row; only the aggregates are held in memory.
//!
//! ```ignore
//! use umls_loader::{BuildConfig, JsonlSink, SinkConfig, StripMarkup, TableBuilder};
//!
//! let sink_config = SinkConfig::default();
//! let mut sink = JsonlSink::open(&sink_config)?;
//!
//! let tables = TableBuilder::new(BuildConfig::english_only("/data/2024AA/META"))
//!     .with_preprocessor(StripMarkup)
//!     .build(&mut sink)?;
//! tables.write_to(&mut sink, sink_config.batch_size)?;
//! ```

#![warn(missing_docs)]

pub mod aggregate;
mod builder;
pub mod conso;
pub mod definition;
mod filter;
pub mod loader;
pub mod normalize;
pub mod parser;
mod preprocess;
mod progress;
pub mod relation;
pub mod semantic_type;
pub mod sink;
mod types;

pub use aggregate::{ConceptAggregator, ConceptShape, StringAggregator, TermAggregator};
pub use builder::{
    TableBuilder, UmlsTables, CONCEPT_COLLECTION, STRING_COLLECTION, STRING_INDEX,
    TERM_COLLECTION,
};
pub use definition::{DefinitionFilter, LanguageClassifier, WhatlangClassifier};
pub use filter::LanguageFilter;
pub use loader::{discover_rrf_files, format_bytes};
pub use parser::{count_lines, RrfParser, RrfRecord, RrfRow, Scanner};
pub use preprocess::{Identity, Preprocessor, StripMarkup};
pub use progress::{NoProgress, Progress};
pub use sink::{DocumentSink, JsonlSink, SinkConfig};
pub use types::{
    BuildConfig, BuildStats, PhaseStats, ProgressUnit, RrfError, RrfFiles, RrfResult,
};

// Re-export umls-types for convenience
pub use umls_types;
