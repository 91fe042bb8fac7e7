//! Input file enumeration
//!
//! Schema and data directories are read flat (no recursion); entries are
//! matched on a case-insensitive extension and returned in sorted order so
//! runs are reproducible.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Schema file extension
pub const SCHEMA_EXTENSION: &str = "xsd";

/// Data file extension
pub const XML_EXTENSION: &str = "xml";

/// Check whether a path has the given extension, ignoring case
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Regular files directly inside `dir` with the given extension, sorted
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read directory '{}': {}", dir.display(), e),
        ))
    })? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if has_extension(&path, extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Schema files in a directory
///
/// An empty directory is not an error here; the catalog decides that.
pub fn collect_schema_files(dir: &Path) -> Result<Vec<PathBuf>> {
    list_files(dir, SCHEMA_EXTENSION)
}

/// Data files for a run
///
/// A file path is returned as-is; a directory yields its `.xml` files.
pub fn collect_xml_files(path: &Path) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let files = list_files(path, XML_EXTENSION)?;
    if files.is_empty() {
        return Err(Error::NoXmlFiles {
            path: path.to_path_buf(),
        });
    }
    Ok(files)
}
