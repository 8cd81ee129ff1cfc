//! MRCONSO atom parser.
//!
//! Parses `MRCONSO.RRF`, one row per atom: an occurrence of a string in
//! a source vocabulary, linked to its concept, term and string ids.

use umls_types::{Cui, Lui, Sui};

use crate::parser::{RrfRecord, RrfRow};
use crate::types::RrfResult;

/// Column layout of MRCONSO.RRF.
pub const CONSO_COLUMNS: &[&str] = &[
    "CUI", "LAT", "TS", "LUI", "STT", "SUI", "ISPREF", "AUI", "SAUI", "SCUI", "SDUI", "SAB",
    "TTY", "CODE", "STR", "SRL", "SUPPRESS", "CVF",
];

const CUI: usize = 0;
const LAT: usize = 1;
const TS: usize = 2;
const LUI: usize = 3;
const SUI: usize = 5;
const STR: usize = 14;

/// Term status marking the preferred LUI of a concept.
pub const PREFERRED_TERM_STATUS: &str = "P";

/// The columns of one MRCONSO row used to build tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoAtom {
    /// Concept the atom belongs to.
    pub cui: Cui,
    /// Vocabulary language code (`LAT`).
    pub language: String,
    /// Term status (`TS`); `P` marks the preferred term.
    pub term_status: String,
    /// Term the atom belongs to.
    pub lui: Lui,
    /// String the atom carries.
    pub sui: Sui,
    /// Surface string (`STR`), untruncated.
    pub string: String,
}

impl ConsoAtom {
    /// Returns true if this atom's LUI is its concept's preferred term.
    pub fn is_preferred(&self) -> bool {
        self.term_status == PREFERRED_TERM_STATUS
    }
}

impl RrfRecord for ConsoAtom {
    fn from_row(row: &RrfRow<'_>) -> RrfResult<Self> {
        Ok(ConsoAtom {
            cui: row.string(CUI)?,
            language: row.string(LAT)?,
            term_status: row.string(TS)?,
            lui: row.string(LUI)?,
            sui: row.string(SUI)?,
            string: row.string(STR)?,
        })
    }
}
