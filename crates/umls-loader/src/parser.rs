//! Generic RRF file parser.
//!
//! Provides a streaming parser for UMLS pipe-delimited RRF files. RRF
//! files have no header row, never quote fields, and end every line with
//! a trailing `|`.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::progress::Progress;
use crate::types::{PhaseStats, ProgressUnit, RrfError, RrfResult};

/// Trait for types that can be parsed from RRF rows.
///
/// Implement this trait for each RRF file schema.
pub trait RrfRecord: Sized {
    /// Parse a record from one row, using fixed column positions.
    fn from_row(row: &RrfRow<'_>) -> RrfResult<Self>;
}

/// One split line of an RRF file, with its location for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct RrfRow<'a> {
    record: &'a StringRecord,
    file: &'a str,
    line: u64,
}

impl<'a> RrfRow<'a> {
    /// Wraps a split record found at `line` of `file`.
    pub fn new(record: &'a StringRecord, file: &'a str, line: u64) -> Self {
        Self { record, file, line }
    }

    /// Returns the field at `index`.
    ///
    /// # Errors
    /// Returns `MalformedRecord` if the line has too few fields.
    pub fn field(&self, index: usize) -> RrfResult<&'a str> {
        self.record
            .get(index)
            .ok_or_else(|| RrfError::MalformedRecord {
                file: self.file.to_string(),
                line: self.line,
                index,
                found: self.record.len(),
            })
    }

    /// Returns the owned field at `index`.
    pub fn string(&self, index: usize) -> RrfResult<String> {
        self.field(index).map(str::to_string)
    }

    /// Returns the file name this row came from.
    pub fn file(&self) -> &'a str {
        self.file
    }

    /// Returns the 1-based line number of this row.
    pub fn line(&self) -> u64 {
        self.line
    }
}

/// A streaming parser for RRF files.
///
/// This parser reads RRF files record-by-record to avoid loading
/// entire files into memory.
pub struct RrfParser<R: Read, T: RrfRecord> {
    reader: Reader<R>,
    file: String,
    records_read: u64,
    _marker: PhantomData<T>,
}

impl<T: RrfRecord> RrfParser<BufReader<File>, T> {
    /// Creates a new parser from a file path.
    ///
    /// # Errors
    /// Returns `FileNotFound` if the path does not exist.
    pub fn from_path<P: AsRef<Path>>(path: P) -> RrfResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(RrfError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_reader(BufReader::new(file), name))
    }
}

impl<R: Read, T: RrfRecord> RrfParser<R, T> {
    /// Creates a new parser from a reader; `file` names it in errors.
    pub fn from_reader(reader: R, file: impl Into<String>) -> Self {
        let reader = ReaderBuilder::new()
            .delimiter(b'|')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        Self {
            reader,
            file: file.into(),
            records_read: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of records read so far.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Returns how far the parser has advanced, in `unit`.
    pub fn position(&self, unit: ProgressUnit) -> u64 {
        let position = self.reader.position();
        match unit {
            ProgressUnit::Bytes => position.byte(),
            ProgressUnit::Lines => position.line().saturating_sub(1),
        }
    }
}

impl<R: Read, T: RrfRecord> Iterator for RrfParser<R, T> {
    type Item = RrfResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => {
                self.records_read += 1;
                let line = record
                    .position()
                    .map_or(self.records_read, |position| position.line());
                Some(T::from_row(&RrfRow::new(&record, &self.file, line)))
            }
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// Counts the lines of a file without holding it in memory.
///
/// A final line without a terminator still counts.
pub fn count_lines<P: AsRef<Path>>(path: P) -> RrfResult<u64> {
    let mut reader = BufReader::with_capacity(64 * 1024, File::open(path.as_ref())?);
    let mut count = 0u64;
    let mut last = None;

    loop {
        let buffer = reader.fill_buf()?;
        if buffer.is_empty() {
            break;
        }
        count += buffer.iter().filter(|&&byte| byte == b'\n').count() as u64;
        last = buffer.last().copied();
        let consumed = buffer.len();
        reader.consume(consumed);
    }

    if matches!(last, Some(byte) if byte != b'\n') {
        count += 1;
    }
    Ok(count)
}

/// Runs full-file scans and reports their progress.
pub struct Scanner<'p> {
    progress: &'p mut dyn Progress,
    unit: ProgressUnit,
}

impl<'p> Scanner<'p> {
    /// Creates a scanner reporting to `progress` in `unit`.
    pub fn new(progress: &'p mut dyn Progress, unit: ProgressUnit) -> Self {
        Self { progress, unit }
    }

    /// Streams every record of `path` through `visit`.
    ///
    /// `visit` returns whether the record was accepted. The first error,
    /// from parsing or from `visit`, aborts the scan.
    pub fn scan<T, F>(&mut self, phase: &str, path: &Path, mut visit: F) -> RrfResult<PhaseStats>
    where
        T: RrfRecord,
        F: FnMut(T) -> RrfResult<bool>,
    {
        let mut parser = RrfParser::<_, T>::from_path(path)?;
        let total = match self.unit {
            ProgressUnit::Bytes => fs::metadata(path)?.len(),
            ProgressUnit::Lines => count_lines(path)?,
        };

        info!(phase, file = %path.display(), "Reading {}", phase);
        self.progress.start(phase, total, self.unit);

        let mut stats = PhaseStats::default();
        while let Some(record) = parser.next() {
            stats.rows_read += 1;
            if visit(record?)? {
                stats.rows_accepted += 1;
            }
            self.progress.advance(parser.position(self.unit));
        }
        self.progress.finish();

        debug!(
            phase,
            rows_read = stats.rows_read,
            rows_accepted = stats.rows_accepted,
            "Scan complete"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[derive(Debug)]
    struct Pair {
        first: String,
        third: String,
    }

    impl RrfRecord for Pair {
        fn from_row(row: &RrfRow<'_>) -> RrfResult<Self> {
            Ok(Pair {
                first: row.string(0)?,
                third: row.string(2)?,
            })
        }
    }

    fn parse(input: &str) -> Vec<RrfResult<Pair>> {
        RrfParser::<_, Pair>::from_reader(input.as_bytes(), "TEST.RRF").collect()
    }

    #[derive(Default)]
    struct Recorder {
        started: Vec<(String, u64)>,
        positions: Vec<u64>,
        finished: usize,
    }

    impl Progress for Recorder {
        fn start(&mut self, phase: &str, total: u64, _unit: ProgressUnit) {
            self.started.push((phase.to_string(), total));
        }

        fn advance(&mut self, position: u64) {
            self.positions.push(position);
        }

        fn finish(&mut self) {
            self.finished += 1;
        }
    }

    #[test]
    fn test_split_on_pipes_with_trailing_delimiter() {
        let rows = parse("C001|ENG|P|\nC002|FRE|S|\n");
        assert_eq!(rows.len(), 2);
        let first = rows[0].as_ref().unwrap();
        assert_eq!(first.first, "C001");
        assert_eq!(first.third, "P");
    }

    #[test]
    fn test_quotes_and_crlf_are_literal() {
        let rows = parse("C001|ENG|\"Quoted\" term|\r\n");
        assert_eq!(rows[0].as_ref().unwrap().third, "\"Quoted\" term");
    }

    #[test]
    fn test_short_line_is_malformed() {
        let rows = parse("C001|ENG|P|\nC002\n");
        assert!(rows[0].is_ok());
        match &rows[1] {
            Err(RrfError::MalformedRecord {
                file,
                line,
                index,
                found,
            }) => {
                assert_eq!(file, "TEST.RRF");
                assert_eq!(*line, 2);
                assert_eq!(*index, 2);
                assert_eq!(*found, 1);
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_fields_line_is_malformed() {
        let rows = parse("C001|ENG|P|\n|\n");
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_ok());
        assert!(matches!(
            rows[1],
            Err(RrfError::MalformedRecord { line: 2, index: 2, found: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = RrfParser::<_, Pair>::from_path("/nonexistent/MRCONSO.RRF");
        assert!(matches!(result, Err(RrfError::FileNotFound { .. })));
    }

    #[test]
    fn test_count_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a|\nb|\nc|").unwrap();
        assert_eq!(count_lines(file.path()).unwrap(), 3);

        let mut terminated = tempfile::NamedTempFile::new().unwrap();
        write!(terminated, "a|\nb|\n").unwrap();
        assert_eq!(count_lines(terminated.path()).unwrap(), 2);

        let empty = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(count_lines(empty.path()).unwrap(), 0);
    }

    #[test]
    fn test_scanner_reports_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "C001|ENG|P|\nC002|FRE|S|\n").unwrap();

        let mut recorder = Recorder::default();
        let stats = Scanner::new(&mut recorder, ProgressUnit::Bytes)
            .scan("pairs", file.path(), |pair: Pair| Ok(pair.first == "C001"))
            .unwrap();

        assert_eq!(stats.rows_read, 2);
        assert_eq!(stats.rows_accepted, 1);
        assert_eq!(recorder.started, vec![("pairs".to_string(), 24)]);
        assert_eq!(recorder.positions.last(), Some(&24));
        assert_eq!(recorder.finished, 1);
    }

    #[test]
    fn test_scanner_reports_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "C001|ENG|P|\nC002|FRE|S|\nC003|GER|S|\n").unwrap();

        let mut recorder = Recorder::default();
        Scanner::new(&mut recorder, ProgressUnit::Lines)
            .scan("pairs", file.path(), |_: Pair| Ok(true))
            .unwrap();

        assert_eq!(recorder.started[0].1, 3);
        assert_eq!(recorder.positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_scanner_stops_on_first_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "C001|ENG|P|\nbroken\nC003|GER|S|\n").unwrap();

        let mut seen = 0;
        let result = Scanner::new(&mut NoProgressGuard, ProgressUnit::Bytes)
            .scan("pairs", file.path(), |_: Pair| {
                seen += 1;
                Ok(true)
            });

        assert!(matches!(result, Err(RrfError::MalformedRecord { line: 2, .. })));
        assert_eq!(seen, 1);
    }

    struct NoProgressGuard;

    impl Progress for NoProgressGuard {
        fn start(&mut self, _phase: &str, _total: u64, _unit: ProgressUnit) {}
        fn advance(&mut self, _position: u64) {}
        fn finish(&mut self) {
            panic!("finish must not run after a failed scan");
        }
    }
}
