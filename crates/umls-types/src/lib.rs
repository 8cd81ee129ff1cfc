//! # umls-types
//!
//! Type definitions for documents built from the UMLS Metathesaurus.
//!
//! The Metathesaurus is distributed in the Rich Release Format (RRF):
//! pipe-delimited flat files such as `MRCONSO.RRF`. This crate holds the
//! three aggregate documents produced from those files, one per
//! identifier layer:
//!
//! - [`Concept`] keyed by CUI
//! - [`Term`] keyed by LUI
//! - [`StringRecord`] keyed by SUI
//!
//! along with the MRREL relation table ([`RelationKind`]) and the
//! vocabulary-to-ISO language table ([`languages`]).
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Field names follow the stored document layout (`_id`, `lui`, `rel`, ...).
//!
//! ## Usage
//!
//! ```rust
//! use umls_types::{Concept, RelationKind};
//!
//! let mut concept = Concept::new("C0018787");
//! concept.lui_list.push("L0018787".to_string());
//!
//! assert_eq!(RelationKind::from_code("RB"), Some(RelationKind::Broader));
//! ```

#![warn(missing_docs)]

mod concept;
mod ids;
pub mod languages;
mod relation;
mod string;
mod term;

// Re-export all public types at crate root
pub use concept::Concept;
pub use ids::{Cui, Lui, Sui};
pub use relation::RelationKind;
pub use string::{StringRecord, MAX_STRING_BYTES};
pub use term::Term;
