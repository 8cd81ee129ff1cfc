//! UMLS identifier types.
//!
//! The Metathesaurus identifies its three core layers with short
//! alphanumeric codes: `C0000005` for concepts, `L0000005` for terms
//! and `S0007492` for strings.

/// Concept Unique Identifier (CUI), e.g. `C0018787`.
///
/// # Examples
///
/// ```
/// use umls_types::Cui;
///
/// let heart: Cui = "C0018787".to_string();
/// assert!(heart.starts_with('C'));
/// ```
pub type Cui = String;

/// Lexical Unique Identifier (LUI), e.g. `L0018787`.
///
/// A LUI groups the lexical variants of one wording of a concept.
pub type Lui = String;

/// String Unique Identifier (SUI), e.g. `S0047147`.
///
/// A SUI names one exact surface string in one language.
pub type Sui = String;
