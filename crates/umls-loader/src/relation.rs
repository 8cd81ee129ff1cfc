//! MRREL relation parser.
//!
//! Parses `MRREL.RRF`. The `REL` column states the relation of the
//! second concept (`CUI2`) to the first (`CUI1`): in a `PAR` row, `CUI2`
//! is a parent of `CUI1`. Relations are therefore recorded on `CUI2`,
//! pointing at `CUI1`.
//!
//! Only the direction present in a row is recorded. MRREL already
//! carries the converse row (`CHD` for `PAR`, `RN` for `RB`, ...), so no
//! inverse edges are synthesized.

use umls_types::{Cui, RelationKind};

use crate::parser::{RrfRecord, RrfRow};
use crate::types::{RrfError, RrfResult};

/// Column layout of MRREL.RRF.
pub const RELATION_COLUMNS: &[&str] = &[
    "CUI1", "AUI1", "STYPE1", "REL", "CUI2", "AUI2", "STYPE2", "RELA", "RUI", "SRUI", "SAB", "SL",
    "RG", "DIR", "SUPPRESS", "CVF",
];

const CUI1: usize = 0;
const REL: usize = 3;
const CUI2: usize = 4;

/// One MRREL row with its relation code resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRow {
    /// The concept the relation is recorded on (`CUI2`).
    pub subject_cui: Cui,
    /// The resolved `REL` code.
    pub kind: RelationKind,
    /// The concept appended to the subject's relation list (`CUI1`).
    pub object_cui: Cui,
}

impl RrfRecord for RelationRow {
    fn from_row(row: &RrfRow<'_>) -> RrfResult<Self> {
        let object_cui = row.string(CUI1)?;
        let code = row.field(REL)?;
        let subject_cui = row.string(CUI2)?;

        let kind = RelationKind::from_code(code).ok_or_else(|| RrfError::UnknownRelationCode {
            code: code.to_string(),
            file: row.file().to_string(),
            line: row.line(),
        })?;

        Ok(RelationRow {
            subject_cui,
            kind,
            object_cui,
        })
    }
}
