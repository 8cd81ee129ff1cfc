//! UMLS source-vocabulary language codes.
//!
//! MRCONSO tags every atom with a three letter language code (`ENG`,
//! `FRE`, ...). MRDEF carries no language at all, so definitions are
//! classified with a statistical model that speaks ISO 639-1. This table
//! bridges the two code spaces.
//!
//! # Examples
//!
//! ```
//! use umls_types::languages;
//!
//! assert_eq!(languages::iso_639_1("ENG"), Some("en"));
//! assert_eq!(languages::iso_639_1("GER"), Some("de"));
//! assert_eq!(languages::iso_639_1("eng"), None);
//! ```

/// Vocabulary language code paired with its ISO 639-1 code.
pub const VOCABULARY_LANGUAGES: &[(&str, &str)] = &[
    ("ENG", "en"),
    ("BAQ", "eu"),
    ("CHI", "zh"),
    ("CZE", "cs"),
    ("DAN", "da"),
    ("DUT", "nl"),
    ("EST", "et"),
    ("FIN", "fi"),
    ("FRE", "fr"),
    ("GER", "de"),
    ("GRE", "el"),
    ("HEB", "he"),
    ("HUN", "hu"),
    ("ITA", "it"),
    ("JPN", "ja"),
    ("KOR", "ko"),
    ("LAV", "lv"),
    ("NOR", "no"),
    ("POL", "pl"),
    ("POR", "pt"),
    ("RUS", "ru"),
    ("SPA", "es"),
    ("SWE", "sv"),
    ("TUR", "tr"),
];

/// English, the only language present in every UMLS release.
pub const ENGLISH: &str = "ENG";

/// Maps a vocabulary language code to ISO 639-1.
///
/// Returns `None` for codes outside the table. No case folding is done.
pub fn iso_639_1(code: &str) -> Option<&'static str> {
    VOCABULARY_LANGUAGES
        .iter()
        .find(|(vocabulary, _)| *vocabulary == code)
        .map(|(_, iso)| *iso)
}

/// Returns true if the vocabulary language code has an ISO 639-1 mapping.
pub fn is_supported(code: &str) -> bool {
    iso_639_1(code).is_some()
}
