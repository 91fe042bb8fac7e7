//! Error types for gar-stream
//!
//! This module defines all error types used throughout the library.
//! Every [`Error`] variant is fatal for the file (or run) that raised it.
//! Record-level problems never become an [`Error`]; the decoder turns them
//! into [`SkippedRecord`](crate::stream::SkippedRecord)s and keeps going.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the gar-stream Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gar-stream operations
#[derive(Error, Debug)]
pub enum Error {
    /// The schema directory contains no `.xsd` files
    #[error("no schemas found in {}", dir.display())]
    NoSchemasFound {
        /// Directory that was scanned
        dir: PathBuf,
    },

    /// Two schema files derive the same dataset prefix
    #[error(
        "duplicate schema prefix '{prefix}': {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateSchemaPrefix {
        /// The colliding prefix
        prefix: String,
        /// Schema registered first
        first: PathBuf,
        /// Schema that collided with it
        second: PathBuf,
    },

    /// Two schema files declare the same root element
    #[error(
        "duplicate schema root element '{root}': {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateRootElement {
        /// The colliding root element name
        root: String,
        /// Schema registered first
        first: PathBuf,
        /// Schema that collided with it
        second: PathBuf,
    },

    /// A schema file could not be read as XML or has no element declaration
    #[error("{}: {source}", path.display())]
    SchemaParse {
        /// Schema file
        path: PathBuf,
        /// Underlying cause
        source: ParseError,
    },

    /// The XML input path yielded no `.xml` files
    #[error("no xml files found in {}", path.display())]
    NoXmlFiles {
        /// Path that was scanned
        path: PathBuf,
    },

    /// No schema is registered under the key derived for a data file
    #[error("no schema found for '{key}' in {}", file.display())]
    SchemaNotFound {
        /// Dataset prefix or root element that was looked up
        key: String,
        /// Data file being processed
        file: PathBuf,
    },

    /// The document root does not match the selected schema
    #[error(
        "root element '{found}' in {} does not match schema root '{expected}'",
        file.display()
    )]
    RootMismatch {
        /// Data file being processed
        file: PathBuf,
        /// Root element declared by the schema
        expected: String,
        /// Root element found in the document
        found: String,
    },

    /// The document ended before any start tag
    #[error("no root element found in {}", path.display())]
    EmptyDocument {
        /// Data file being processed
        path: PathBuf,
    },

    /// The XML token stream is broken outside of a record body
    #[error("malformed XML in {}: {source}", path.display())]
    MalformedXml {
        /// Data file being processed
        path: PathBuf,
        /// Underlying cause
        source: ParseError,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Attach a file path to a low-level parse error
    pub fn malformed(path: impl Into<PathBuf>, source: ParseError) -> Self {
        Self::MalformedXml {
            path: path.into(),
            source,
        }
    }

    /// Attach a schema path to a low-level parse error
    pub fn schema_parse(path: impl Into<PathBuf>, source: ParseError) -> Self {
        Self::SchemaParse {
            path: path.into(),
            source,
        }
    }
}

/// Missing required attributes on one element instance
///
/// Record-level only: it ends up as the cause of a skipped record, never as
/// an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Element that failed validation
    pub element: String,
    /// Required attributes absent from the element
    pub missing: Vec<String>,
}

impl ValidationError {
    /// Build the error reported when required attributes are absent
    pub fn missing_attributes(element: impl Into<String>, missing: Vec<String>) -> Self {
        let message = if missing.len() == 1 {
            format!("missing required attribute {}", missing[0])
        } else {
            format!("missing required attributes {}", missing.join(", "))
        };
        Self {
            message,
            element: element.into(),
            missing,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Low-level XML token error with its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Byte offset in the input where the error surfaced
    pub offset: Option<u64>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: None,
        }
    }

    /// Set the byte offset
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(offset) = self.offset {
            write!(f, " at byte {}", offset)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        ParseError::new(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ParseError::new(err.to_string())
    }
}
