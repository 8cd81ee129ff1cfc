//! MRSTY semantic type parser.

use umls_types::Cui;

use crate::parser::{RrfRecord, RrfRow};
use crate::types::RrfResult;

/// Column layout of MRSTY.RRF.
pub const SEMANTIC_TYPE_COLUMNS: &[&str] = &["CUI", "TUI", "STN", "STY", "ATUI", "CVF"];

const CUI: usize = 0;
const STN: usize = 2;

/// One MRSTY row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticTypeRow {
    /// The concept being typed.
    pub cui: Cui,
    /// Semantic type tree number (`STN`), e.g. `A1.4.1.2.1.7`.
    pub semantic_type: String,
}

impl RrfRecord for SemanticTypeRow {
    fn from_row(row: &RrfRow<'_>) -> RrfResult<Self> {
        Ok(SemanticTypeRow {
            cui: row.string(CUI)?,
            semantic_type: row.string(STN)?,
        })
    }
}
