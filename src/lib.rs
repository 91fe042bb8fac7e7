//! # gar-stream
//!
//! Streaming conversion of GAR/FIAS address-registry XML exports into
//! newline-delimited JSON, with required-attribute checks taken from the
//! matching XSD schemas.
//!
//! ## Features
//!
//! - Schema catalog keyed by dataset prefix (`AS_HOUSES`, `AS_PARAM`, ...)
//!   or by root element
//! - Bounded-memory pull decoding of multi-gigabyte exports
//! - Per-record skip-and-continue on missing required attributes
//! - Expected-count checks with an optional counting pre-pass
//! - Append-only warning log for skipped records and count mismatches
//!
//! ## Example
//!
//! ```rust,ignore
//! use gar_stream::catalog::SchemaCatalog;
//! use gar_stream::config::{ConvertOptions, MatchMode};
//! use gar_stream::converters::JsonLinesSink;
//! use gar_stream::pipeline::Pipeline;
//! use gar_stream::report::WarningLog;
//!
//! let catalog = SchemaCatalog::load("gar_schemas", MatchMode::DatasetPrefix)?;
//! let pipeline = Pipeline::new(&catalog, ConvertOptions::default());
//! let mut sink = JsonLinesSink::new(std::io::stdout().lock());
//! let files = gar_stream::loaders::collect_xml_files("data/77".as_ref())?;
//! pipeline.run(&files, &mut sink, &WarningLog::new("validation.log"))?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod names;
pub mod prefix;

// Schemas
pub mod schemas;
pub mod catalog;

// Documents and decoding
pub mod loaders;
pub mod documents;
pub mod stream;
pub mod converters;

// Orchestration
pub mod config;
pub mod report;
pub mod pipeline;

// Re-exports for convenience
pub use catalog::SchemaCatalog;
pub use config::{ConvertOptions, ExpectedCount, MatchMode};
pub use converters::{JsonLinesSink, Record, RecordSink};
pub use error::{Error, Result};
pub use pipeline::{FileReport, Pipeline, RunSummary};
pub use prefix::derive_prefix;
pub use schemas::SchemaDescriptor;
pub use stream::{SkippedRecord, StreamResult};

/// Version of the gar-stream library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
