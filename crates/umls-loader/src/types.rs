//! Loader-specific types for RRF file processing.

use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;
use umls_types::languages;

/// Errors that can occur while building UMLS tables.
#[derive(Error, Debug)]
pub enum RrfError {
    /// I/O error reading an RRF file or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error (e.g. invalid UTF-8 in a field).
    #[error("RRF parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding error while writing documents.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Language code without an ISO 639-1 mapping.
    #[error("Language '{code}' has no ISO 639-1 mapping; supported codes are listed in umls_types::languages")]
    UnmappedLanguage {
        /// The rejected vocabulary language code.
        code: String,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Required file missing from the META directory.
    #[error("Required RRF file not found: {file_type} in {directory}")]
    RequiredFileMissing {
        /// The files that were missing.
        file_type: String,
        /// The directory that was searched.
        directory: String,
    },

    /// A line has fewer fields than its schema requires.
    #[error("Malformed record in {file} at line {line}: field {index} requested, {found} fields present")]
    MalformedRecord {
        /// The RRF file name.
        file: String,
        /// 1-based line number.
        line: u64,
        /// The 0-based field index that was requested.
        index: usize,
        /// The number of fields on the line.
        found: usize,
    },

    /// An MRREL `REL` code outside the relation table.
    #[error("Unknown relation code '{code}' in {file} at line {line}")]
    UnknownRelationCode {
        /// The unrecognized code.
        code: String,
        /// The RRF file name.
        file: String,
        /// 1-based line number.
        line: u64,
    },

    /// No character boundary exists inside the byte budget.
    #[error("Cannot truncate string to {max_bytes} bytes without dropping every character")]
    Truncation {
        /// The byte budget that could not be met.
        max_bytes: usize,
    },

    /// A document violates a unique index of the sink.
    #[error("Duplicate key in collection '{collection}': {key}")]
    DuplicateKey {
        /// The collection being written.
        collection: String,
        /// The offending key values.
        key: String,
    },
}

/// Result type for RRF operations.
pub type RrfResult<T> = Result<T, RrfError>;

/// How scan progress is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressUnit {
    /// Bytes consumed against the file size; a single pass.
    #[default]
    Bytes,
    /// Lines consumed against a pre-counted total; costs an extra pass.
    Lines,
}

/// Configuration for a table build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// META directory, or a release root containing `META/`.
    pub meta_dir: PathBuf,
    /// Vocabulary language codes to keep. Empty keeps every atom and no
    /// definitions.
    pub languages: BTreeSet<String>,
    /// Whether to read MRDEF into `Concept::definitions`.
    pub process_definitions: bool,
    /// Whether to read MRREL into `Concept::relations`.
    pub process_relations: bool,
    /// Whether to read MRSTY into `Concept::semantic_types`.
    pub process_semantic_types: bool,
    /// Progress measurement for each scan.
    pub progress_unit: ProgressUnit,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            meta_dir: PathBuf::from("META"),
            languages: BTreeSet::new(),
            process_definitions: true,
            process_relations: true,
            process_semantic_types: true,
            progress_unit: ProgressUnit::Bytes,
        }
    }
}

impl BuildConfig {
    /// Creates a config for `meta_dir` with every pass enabled.
    pub fn new(meta_dir: impl Into<PathBuf>) -> Self {
        Self {
            meta_dir: meta_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a config that only keeps English atoms and definitions.
    pub fn english_only(meta_dir: impl Into<PathBuf>) -> Self {
        Self::new(meta_dir).with_languages([languages::ENGLISH])
    }

    /// Creates a config that only reads MRCONSO.
    pub fn atoms_only(meta_dir: impl Into<PathBuf>) -> Self {
        Self {
            process_definitions: false,
            process_relations: false,
            process_semantic_types: false,
            ..Self::new(meta_dir)
        }
    }

    /// Replaces the accepted language set. Duplicates collapse.
    pub fn with_languages<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Maps the accepted languages to ISO 639-1.
    ///
    /// # Errors
    /// Returns `UnmappedLanguage` for the first code without a mapping.
    pub fn validate(&self) -> RrfResult<BTreeSet<&'static str>> {
        self.languages
            .iter()
            .map(|code| {
                languages::iso_639_1(code).ok_or_else(|| RrfError::UnmappedLanguage {
                    code: code.clone(),
                })
            })
            .collect()
    }
}

/// Statistics from one scan of an RRF file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseStats {
    /// Rows read from the file.
    pub rows_read: usize,
    /// Rows that passed filters and touched an aggregate.
    pub rows_accepted: usize,
}

impl PhaseStats {
    /// Returns the number of rows rejected by filters.
    pub fn rows_skipped(&self) -> usize {
        self.rows_read - self.rows_accepted
    }

    /// Returns the percentage of rows that passed filters.
    pub fn accept_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.rows_accepted as f64 / self.rows_read as f64) * 100.0
        }
    }
}

/// Statistics for a whole build.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// MRCONSO scan for terms.
    pub terms: PhaseStats,
    /// MRCONSO scan for strings.
    pub strings: PhaseStats,
    /// MRCONSO scan for concepts.
    pub concepts: PhaseStats,
    /// MRDEF scan, if enabled.
    pub definitions: Option<PhaseStats>,
    /// MRREL scan, if enabled.
    pub relations: Option<PhaseStats>,
    /// MRSTY scan, if enabled.
    pub semantic_types: Option<PhaseStats>,
}

/// Discovered RRF files in a META directory.
#[derive(Debug, Clone, Default)]
pub struct RrfFiles {
    /// The META directory that was searched.
    pub meta_dir: PathBuf,
    /// Path to MRCONSO.RRF (atoms).
    pub conso_file: Option<PathBuf>,
    /// Path to MRDEF.RRF (definitions).
    pub definition_file: Option<PathBuf>,
    /// Path to MRREL.RRF (relations).
    pub relation_file: Option<PathBuf>,
    /// Path to MRSTY.RRF (semantic types).
    pub semantic_type_file: Option<PathBuf>,
}

impl RrfFiles {
    /// Creates a new empty RrfFiles.
    pub fn new(meta_dir: impl Into<PathBuf>) -> Self {
        Self {
            meta_dir: meta_dir.into(),
            ..Default::default()
        }
    }

    /// Returns the files `config` needs that were not found.
    pub fn missing_files(&self, config: &BuildConfig) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.conso_file.is_none() {
            missing.push("MRCONSO.RRF");
        }
        if config.process_definitions && self.definition_file.is_none() {
            missing.push("MRDEF.RRF");
        }
        if config.process_relations && self.relation_file.is_none() {
            missing.push("MRREL.RRF");
        }
        if config.process_semantic_types && self.semantic_type_file.is_none() {
            missing.push("MRSTY.RRF");
        }
        missing
    }

    /// Returns an error naming every file `config` needs that was not found.
    pub fn require(&self, config: &BuildConfig) -> RrfResult<()> {
        let missing = self.missing_files(config);
        if missing.is_empty() {
            return Ok(());
        }
        Err(RrfError::RequiredFileMissing {
            file_type: missing.join(", "),
            directory: self.meta_dir.display().to_string(),
        })
    }
}
