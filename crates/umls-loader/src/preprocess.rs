//! Definition text preprocessing.
//!
//! Accepted definitions pass through one [`Preprocessor`] before they are
//! stored. The default keeps text as-is.

use once_cell::sync::Lazy;
use regex::Regex;

/// A text transform applied to accepted definitions.
pub trait Preprocessor {
    /// Returns the processed form of `text`.
    fn process(&self, text: &str) -> String;
}

/// Leaves text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Preprocessor for Identity {
    fn process(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Removes HTML/XML markup from definitions.
///
/// Several MRDEF sources embed tags such as `<i>` or `<p>` and escaped
/// entities. Tags become spaces, common entities are decoded, and
/// whitespace is collapsed.
///
/// # Examples
///
/// ```
/// use umls_loader::{Preprocessor, StripMarkup};
///
/// let text = "An <i>in vitro</i> assay &amp; its <b>result</b>.";
/// assert_eq!(StripMarkup.process(text), "An in vitro assay & its result .");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StripMarkup;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]*>").expect("valid regex"));

const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&nbsp;", " "),
    // Last, so "&amp;lt;" decodes to "&lt;" and not "<".
    ("&amp;", "&"),
];

impl Preprocessor for StripMarkup {
    fn process(&self, text: &str) -> String {
        let mut stripped = TAG.replace_all(text, " ").into_owned();
        for (entity, replacement) in ENTITIES {
            if stripped.contains(entity) {
                stripped = stripped.replace(entity, replacement);
            }
        }
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_keeps_markup() {
        assert_eq!(Identity.process("<i>x</i>  y"), "<i>x</i>  y");
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            StripMarkup.process("<p>Bone&nbsp;marrow</p>\n<p>aspirate</p>"),
            "Bone marrow aspirate"
        );
        assert_eq!(StripMarkup.process("a &lt; b"), "a < b");
        assert_eq!(StripMarkup.process("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_plain_text_only_collapses_whitespace() {
        assert_eq!(
            StripMarkup.process("  dose  < 5 mg "),
            "dose < 5 mg"
        );
    }
}
