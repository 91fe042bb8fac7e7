//! Conversion pipeline
//!
//! Ties the pieces together for each data file: root detection, schema
//! lookup, the optional counting pass, the extraction pass, and warning
//! reporting. The first fatal error stops the run.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::SchemaCatalog;
use crate::config::{ConvertOptions, ExpectedCount, MatchMode};
use crate::converters::RecordSink;
use crate::documents::detect_root;
use crate::error::{Error, Result};
use crate::report::{count_mismatch_line, skipped_record_line, WarningSink};
use crate::stream::{count_elements, stream_elements, StreamResult};

/// Outcome of one data file
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Data file
    pub file: PathBuf,
    /// Schema used for it
    pub schema: PathBuf,
    /// Document root element
    pub root: String,
    /// Streaming outcome
    pub result: StreamResult,
}

/// Totals over a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files converted
    pub files: usize,
    /// Records emitted
    pub records: usize,
    /// Records skipped
    pub skipped: usize,
    /// Files whose emitted count differed from the expected count
    pub mismatches: usize,
}

impl RunSummary {
    fn add(&mut self, report: &FileReport) {
        self.files += 1;
        self.records += report.result.processed;
        self.skipped += report.result.skipped.len();
        if report.result.count_mismatch().is_some() {
            self.mismatches += 1;
        }
    }
}

/// Converter for a run of files against one catalog
#[derive(Debug)]
pub struct Pipeline<'a> {
    catalog: &'a SchemaCatalog,
    options: ConvertOptions,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline
    pub fn new(catalog: &'a SchemaCatalog, options: ConvertOptions) -> Self {
        Self { catalog, options }
    }

    /// Options in use
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Schema matching mode, as fixed by the catalog
    pub fn match_mode(&self) -> MatchMode {
        self.catalog.mode()
    }

    /// Convert one file
    pub fn process_file(
        &self,
        file: &Path,
        sink: &mut dyn RecordSink,
        warnings: &dyn WarningSink,
    ) -> Result<FileReport> {
        let root = detect_root(file)?;
        let schema = self.catalog.schema_for(file, &root)?;

        if self.options.verify_root()
            && self.match_mode() == MatchMode::DatasetPrefix
            && schema.root_element != root
        {
            return Err(Error::RootMismatch {
                file: file.to_path_buf(),
                expected: schema.root_element.clone(),
                found: root,
            });
        }

        info!(
            schema = %schema.path.display(),
            root = %schema.root_element,
            file = %file.display(),
            "using schema"
        );

        let element = self.options.element();
        let expected = match self.options.expected_count() {
            ExpectedCount::Counted => Some(count_elements(file, element)?.0),
            ExpectedCount::Fixed(count) => Some(count),
            ExpectedCount::Disabled => None,
        };

        let result = stream_elements(file, element, expected, &schema.required_attributes, sink)?;
        sink.flush()?;

        for skipped in &result.skipped {
            let line = skipped_record_line(file, skipped);
            warn!("{}", line);
            warnings.warn(&line)?;
        }

        if let Some(expected) = result.count_mismatch() {
            let line = count_mismatch_line(file, expected, result.processed);
            warn!("{}", line);
            warnings.warn(&line)?;
        }

        info!(
            file = %file.display(),
            processed = result.processed,
            skipped = result.skipped.len(),
            "file converted"
        );

        Ok(FileReport {
            file: file.to_path_buf(),
            schema: schema.path.clone(),
            root,
            result,
        })
    }

    /// Convert files in order, stopping at the first fatal error
    pub fn run(
        &self,
        files: &[PathBuf],
        sink: &mut dyn RecordSink,
        warnings: &dyn WarningSink,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for file in files {
            let report = self.process_file(file, sink, warnings)?;
            summary.add(&report);
        }

        info!(
            files = summary.files,
            records = summary.records,
            skipped = summary.skipped,
            mismatches = summary.mismatches,
            "run complete"
        );
        Ok(summary)
    }
}
