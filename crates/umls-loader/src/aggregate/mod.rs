//! Per-key aggregates built while streaming RRF files.
//!
//! Each aggregator owns a map from identifier to document. A document is
//! created on the first row that references its key and then only grows:
//! list fields are appended to, scalar fields are overwritten.

mod concept;
mod string;
mod term;

pub use concept::{ConceptAggregator, ConceptShape};
pub use string::StringAggregator;
pub use term::TermAggregator;
