//! MRDEF definition parser and language classification.
//!
//! MRDEF has no language column, so each definition's language is
//! guessed from its text. Guesses on short or mixed text can be wrong;
//! the classifier is deterministic, so a rerun yields the same result.

use std::collections::BTreeSet;

use umls_types::Cui;

use crate::parser::{RrfRecord, RrfRow};
use crate::types::RrfResult;

/// Column layout of MRDEF.RRF.
pub const DEFINITION_COLUMNS: &[&str] =
    &["CUI", "AUI", "ATUI", "SATUI", "SAB", "DEF", "SUPPRESS", "CVF"];

const CUI: usize = 0;
const DEF: usize = 5;

/// One MRDEF row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionRow {
    /// The concept being defined.
    pub cui: Cui,
    /// Definition text, possibly with inline markup.
    pub text: String,
}

impl RrfRecord for DefinitionRow {
    fn from_row(row: &RrfRow<'_>) -> RrfResult<Self> {
        Ok(DefinitionRow {
            cui: row.string(CUI)?,
            text: row.string(DEF)?,
        })
    }
}

/// Guesses the language of free text.
pub trait LanguageClassifier {
    /// Returns an ISO 639-1 code (or another code that matches no
    /// accepted language), or `None` if no guess is possible.
    fn classify(&self, text: &str) -> Option<&'static str>;
}

/// Trigram-based classifier backed by `whatlang`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangClassifier;

impl LanguageClassifier for WhatlangClassifier {
    fn classify(&self, text: &str) -> Option<&'static str> {
        let code = whatlang::detect(text)?.lang().code();
        Some(iso_639_1_from_639_3(code).unwrap_or(code))
    }
}

/// Maps ISO 639-3 codes reported by the classifier to ISO 639-1.
fn iso_639_1_from_639_3(code: &str) -> Option<&'static str> {
    let iso = match code {
        "eng" => "en",
        "eus" => "eu",
        "cmn" => "zh",
        "ces" => "cs",
        "dan" => "da",
        "nld" => "nl",
        "est" => "et",
        "fin" => "fi",
        "fra" => "fr",
        "deu" => "de",
        "ell" => "el",
        "heb" => "he",
        "hun" => "hu",
        "ita" => "it",
        "jpn" => "ja",
        "kor" => "ko",
        "lav" => "lv",
        "nob" => "no",
        "pol" => "pl",
        "por" => "pt",
        "rus" => "ru",
        "spa" => "es",
        "swe" => "sv",
        "tur" => "tr",
        _ => return None,
    };
    Some(iso)
}

/// Keeps definitions whose classified language is accepted.
pub struct DefinitionFilter<'c> {
    classifier: &'c dyn LanguageClassifier,
    accepted: BTreeSet<&'static str>,
}

impl<'c> DefinitionFilter<'c> {
    /// Creates a filter over ISO 639-1 codes; an empty set accepts nothing.
    pub fn new(classifier: &'c dyn LanguageClassifier, accepted: BTreeSet<&'static str>) -> Self {
        Self {
            classifier,
            accepted,
        }
    }

    /// Returns true if `text` is in an accepted language.
    pub fn accepts(&self, text: &str) -> bool {
        self.classifier
            .classify(text)
            .is_some_and(|language| self.accepted.contains(language))
    }
}
