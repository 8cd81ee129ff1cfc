//! Persistence of built tables.
//!
//! Tables are handed to a [`DocumentSink`]: anything that can insert
//! batches of JSON documents into named collections and enforce unique
//! indexes. [`JsonlSink`] is the file-backed implementation.

use std::collections::{HashMap, HashSet};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tracing::debug;

use crate::types::{RrfError, RrfResult};

/// Field every document is keyed on.
pub const ID_FIELD: &str = "_id";

/// A store of document collections.
pub trait DocumentSink {
    /// Declares a unique index over `fields` of `collection`.
    ///
    /// Documents inserted afterwards must not repeat a value tuple.
    fn create_unique_index(&mut self, collection: &str, fields: &[&str]) -> RrfResult<()>;

    /// Inserts `documents` into `collection`, in order.
    ///
    /// # Errors
    /// Returns `DuplicateKey` at the first document that violates a
    /// unique index; documents before it stay inserted.
    fn insert_many(&mut self, collection: &str, documents: Vec<Value>) -> RrfResult<usize>;
}

/// Location of the file-backed sink.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Root directory for databases.
    pub output_dir: PathBuf,
    /// Database name; a subdirectory of `output_dir`.
    pub database: String,
    /// Documents per `insert_many` call.
    pub batch_size: usize,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            database: "umls".to_string(),
            batch_size: 10_000,
        }
    }
}

impl SinkConfig {
    /// Returns the directory holding this database's collections.
    pub fn database_dir(&self) -> PathBuf {
        self.output_dir.join(&self.database)
    }
}

#[derive(Debug)]
struct UniqueIndex {
    fields: Vec<String>,
    seen: HashSet<Vec<String>>,
}

impl UniqueIndex {
    fn new(fields: Vec<String>) -> Self {
        Self {
            fields,
            seen: HashSet::new(),
        }
    }

    /// Records the document's key; returns it if already present.
    fn check(&mut self, document: &Value) -> Option<String> {
        let key: Vec<String> = self
            .fields
            .iter()
            .map(|field| document.get(field).unwrap_or(&Value::Null).to_string())
            .collect();

        if self.seen.contains(&key) {
            let described = self
                .fields
                .iter()
                .zip(&key)
                .map(|(field, value)| format!("{}: {}", field, value))
                .collect::<Vec<_>>()
                .join(", ");
            return Some(format!("{{ {} }}", described));
        }
        self.seen.insert(key);
        None
    }
}

/// Writes each collection as JSON lines under `<output_dir>/<database>/`.
///
/// Every collection gets an implicit unique index on `_id`. Declared
/// indexes are recorded in `indexes.json`.
#[derive(Debug)]
pub struct JsonlSink {
    dir: PathBuf,
    indexes: HashMap<String, Vec<UniqueIndex>>,
    writers: HashMap<String, BufWriter<File>>,
}

impl JsonlSink {
    /// Opens the database directory, creating it if needed.
    ///
    /// Existing collection files are truncated on first insert.
    pub fn open(config: &SinkConfig) -> RrfResult<Self> {
        let dir = config.database_dir();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            indexes: HashMap::new(),
            writers: HashMap::new(),
        })
    }

    /// Returns the database directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of a collection's file.
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.jsonl", collection))
    }

    /// Flushes every open collection file.
    pub fn flush(&mut self) -> RrfResult<()> {
        for writer in self.writers.values_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn indexes_for(&mut self, collection: &str) -> &mut Vec<UniqueIndex> {
        self.indexes
            .entry(collection.to_string())
            .or_insert_with(|| vec![UniqueIndex::new(vec![ID_FIELD.to_string()])])
    }

    fn write_index_manifest(&self) -> RrfResult<()> {
        let mut manifest: Vec<Value> = self
            .indexes
            .iter()
            .flat_map(|(collection, indexes)| {
                indexes
                    .iter()
                    .filter(|index| index.fields != [ID_FIELD])
                    .map(move |index| {
                        json!({
                            "collection": collection,
                            "fields": index.fields,
                            "unique": true,
                        })
                    })
            })
            .collect();
        manifest.sort_by_key(|entry| entry.to_string());

        let file = File::create(self.dir.join("indexes.json"))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &manifest)?;
        Ok(())
    }
}

impl DocumentSink for JsonlSink {
    fn create_unique_index(&mut self, collection: &str, fields: &[&str]) -> RrfResult<()> {
        let fields: Vec<String> = fields.iter().map(|field| field.to_string()).collect();
        let indexes = self.indexes_for(collection);
        if !indexes.iter().any(|index| index.fields == fields) {
            indexes.push(UniqueIndex::new(fields));
        }
        debug!(collection, "Created unique index");
        self.write_index_manifest()
    }

    fn insert_many(&mut self, collection: &str, documents: Vec<Value>) -> RrfResult<usize> {
        if !self.writers.contains_key(collection) {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(self.collection_path(collection))?;
            self.writers
                .insert(collection.to_string(), BufWriter::new(file));
        }

        let mut inserted = 0;
        for document in documents {
            for index in self.indexes_for(collection).iter_mut() {
                if let Some(key) = index.check(&document) {
                    return Err(RrfError::DuplicateKey {
                        collection: collection.to_string(),
                        key,
                    });
                }
            }

            if let Some(writer) = self.writers.get_mut(collection) {
                serde_json::to_writer(&mut *writer, &document)?;
                writer.write_all(b"\n")?;
            }
            inserted += 1;
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_sink(dir: &Path) -> JsonlSink {
        JsonlSink::open(&SinkConfig {
            output_dir: dir.to_path_buf(),
            database: "umls".to_string(),
            batch_size: 2,
        })
        .unwrap()
    }

    #[test]
    fn test_insert_writes_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = open_sink(dir.path());

        let count = sink
            .insert_many("term", vec![json!({"_id": "L001"}), json!({"_id": "L002"})])
            .unwrap();
        sink.flush().unwrap();

        assert_eq!(count, 2);
        let written = fs::read_to_string(sink.collection_path("term")).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.starts_with("{\"_id\":\"L001\"}"));
    }

    #[test]
    fn test_implicit_id_index() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = open_sink(dir.path());

        let result = sink.insert_many("term", vec![json!({"_id": "L001"}), json!({"_id": "L001"})]);
        match result {
            Err(RrfError::DuplicateKey { collection, key }) => {
                assert_eq!(collection, "term");
                assert!(key.contains("L001"));
            }
            other => panic!("expected DuplicateKey, got {:?}", other),
        }
    }

    #[test]
    fn test_composite_unique_index() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = open_sink(dir.path());
        sink.create_unique_index("string", &["string", "lower", "lang"])
            .unwrap();

        let first = json!({"_id": "S001", "string": "Heart", "lower": "heart", "lang": "ENG"});
        let other_lang = json!({"_id": "S002", "string": "Heart", "lower": "heart", "lang": "DUT"});
        let clash = json!({"_id": "S003", "string": "Heart", "lower": "heart", "lang": "ENG"});

        assert_eq!(sink.insert_many("string", vec![first, other_lang]).unwrap(), 2);
        assert!(matches!(
            sink.insert_many("string", vec![clash]),
            Err(RrfError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn test_index_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = open_sink(dir.path());
        sink.create_unique_index("string", &["string", "lower", "lang"])
            .unwrap();
        sink.create_unique_index("string", &["string", "lower", "lang"])
            .unwrap();

        let manifest: Value =
            serde_json::from_str(&fs::read_to_string(sink.dir().join("indexes.json")).unwrap())
                .unwrap();
        assert_eq!(
            manifest,
            json!([{"collection": "string", "fields": ["string", "lower", "lang"], "unique": true}])
        );
    }
}
