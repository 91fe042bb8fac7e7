//! Warning reporting
//!
//! Skipped records and count mismatches are not fatal; they are written as
//! one line each to a [`WarningSink`]. The sink is passed explicitly to the
//! pipeline and takes `&self`, so one sink can serve files processed on
//! several threads. Implementations serialize their own writes.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::stream::SkippedRecord;

/// Destination for warning lines
pub trait WarningSink: Send + Sync {
    /// Record one warning line (without trailing newline)
    fn warn(&self, line: &str) -> Result<()>;
}

/// Line logged when the emitted count differs from the expected count
pub fn count_mismatch_line(file: &Path, expected: usize, processed: usize) -> String {
    format!(
        "expected {} records but processed {} in {}",
        expected,
        processed,
        file.display()
    )
}

/// Line logged for one skipped record
pub fn skipped_record_line(file: &Path, skipped: &SkippedRecord) -> String {
    format!(
        "{}: skipped record #{} at byte {} for element {}: {}",
        file.display(),
        skipped.index,
        skipped.byte_offset,
        skipped.element,
        skipped.error
    )
}

/// Append-only warning log file
///
/// The file is opened (and created if needed) per line, so a run without
/// warnings leaves no file behind.
#[derive(Debug)]
pub struct WarningLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl WarningLog {
    /// Log to the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Log file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WarningSink for WarningLog {
    fn warn(&self, line: &str) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Config("warning log lock poisoned".to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

/// Warning sink that keeps lines in memory
#[derive(Debug, Default)]
pub struct MemoryWarnings {
    lines: Mutex<Vec<String>>,
}

impl MemoryWarnings {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines received so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl WarningSink for MemoryWarnings {
    fn warn(&self, line: &str) -> Result<()> {
        self.lines
            .lock()
            .map_err(|_| Error::Config("warning buffer lock poisoned".to_string()))?
            .push(line.to_string());
        Ok(())
    }
}
