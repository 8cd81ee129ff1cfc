//! RRF file discovery utilities.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::{RrfError, RrfFiles, RrfResult};

/// Atom file name.
pub const CONSO_FILE: &str = "MRCONSO.RRF";
/// Definition file name.
pub const DEFINITION_FILE: &str = "MRDEF.RRF";
/// Relation file name.
pub const RELATION_FILE: &str = "MRREL.RRF";
/// Semantic type file name.
pub const SEMANTIC_TYPE_FILE: &str = "MRSTY.RRF";

/// Discovers RRF files in a UMLS release.
///
/// `path` may be the META directory itself or a release root with a
/// `META` subdirectory. Only file names are inspected; nothing is read.
pub fn discover_rrf_files<P: AsRef<Path>>(path: P) -> RrfResult<RrfFiles> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(RrfError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let meta_dir = find_meta_dir(path)?;
    let mut files = RrfFiles::new(&meta_dir);

    for entry in fs::read_dir(&meta_dir)? {
        let entry = entry?;
        let filename = entry.file_name();

        match filename.to_string_lossy().as_ref() {
            CONSO_FILE => files.conso_file = Some(entry.path()),
            DEFINITION_FILE => files.definition_file = Some(entry.path()),
            RELATION_FILE => files.relation_file = Some(entry.path()),
            SEMANTIC_TYPE_FILE => files.semantic_type_file = Some(entry.path()),
            _ => continue,
        }
    }

    for (name, file) in [
        (CONSO_FILE, &files.conso_file),
        (DEFINITION_FILE, &files.definition_file),
        (RELATION_FILE, &files.relation_file),
        (SEMANTIC_TYPE_FILE, &files.semantic_type_file),
    ] {
        match file {
            Some(file) => debug!(
                "Found {} ({})",
                name,
                format_bytes(fs::metadata(file).map_or(0, |m| m.len()))
            ),
            None => debug!("{} not present in {}", name, meta_dir.display()),
        }
    }

    Ok(files)
}

/// Finds the directory holding MRCONSO.RRF.
fn find_meta_dir(base: &Path) -> RrfResult<PathBuf> {
    if base.join(CONSO_FILE).is_file() {
        return Ok(base.to_path_buf());
    }

    let meta = base.join("META");
    if meta.is_dir() {
        return Ok(meta);
    }

    // A META directory without MRCONSO is reported by the caller as a
    // missing file rather than a missing directory.
    if base.ends_with("META") {
        return Ok(base.to_path_buf());
    }

    Err(RrfError::DirectoryNotFound {
        path: format!("META directory not found in {}", base.display()),
    })
}

/// Formats a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
