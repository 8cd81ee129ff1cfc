//! Language filtering of MRCONSO atoms.

use std::collections::BTreeSet;

/// Accepts atoms whose `LAT` code is in a configured set.
///
/// An empty set accepts everything. Codes are compared exactly, so the
/// set must use the vocabulary's own casing (`ENG`, not `eng`).
///
/// # Examples
///
/// ```
/// use umls_loader::LanguageFilter;
///
/// let filter = LanguageFilter::new(["ENG", "FRE"]);
/// assert!(filter.accepts("ENG"));
/// assert!(!filter.accepts("eng"));
/// assert!(LanguageFilter::default().accepts("JPN"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageFilter {
    codes: BTreeSet<String>,
}

impl LanguageFilter {
    /// Creates a filter accepting `codes`.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `code` passes the filter.
    pub fn accepts(&self, code: &str) -> bool {
        self.codes.is_empty() || self.codes.contains(code)
    }

    /// Returns true if the filter accepts every code.
    pub fn is_open(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_accepts_all() {
        let filter = LanguageFilter::default();
        assert!(filter.is_open());
        assert!(filter.accepts("ENG"));
        assert!(filter.accepts(""));
    }

    #[test]
    fn test_exact_match_only() {
        let filter = LanguageFilter::new(["SPA"]);
        assert!(!filter.is_open());
        assert!(filter.accepts("SPA"));
        assert!(!filter.accepts("spa"));
        assert!(!filter.accepts("SPA "));
        assert!(!filter.accepts("ENG"));
    }
}
