//! Conversion options
//!
//! [`ConvertOptions`] is what the CLI (or any other caller) hands to the
//! pipeline. It is built with `with_*` chaining on top of the defaults.
//! The [`MatchMode`] is not part of it: it is fixed when the
//! [`SchemaCatalog`](crate::catalog::SchemaCatalog) is loaded, and the
//! pipeline follows the catalog.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How data files are matched to schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// By dataset prefix derived from the file names
    #[default]
    DatasetPrefix,
    /// By the document root element
    RootElement,
}

impl FromStr for MatchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prefix" | "dataset-prefix" => Ok(Self::DatasetPrefix),
            "root" | "root-element" => Ok(Self::RootElement),
            _ => Err(Error::Config(format!(
                "unknown match mode: {}. Use: prefix, root",
                s
            ))),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DatasetPrefix => write!(f, "prefix"),
            Self::RootElement => write!(f, "root"),
        }
    }
}

/// Where the expected record count of a file comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpectedCount {
    /// Count target elements in a pre-pass over the file
    #[default]
    Counted,
    /// The same caller-supplied count for every file
    Fixed(usize),
    /// No mismatch detection
    Disabled,
}

/// Options for converting a run of files
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Explicit target element; the first child of the root otherwise
    element: Option<String>,
    /// Expected count source
    expected_count: ExpectedCount,
    /// Whether the document root must equal the schema root element
    verify_root: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            element: None,
            expected_count: ExpectedCount::default(),
            verify_root: true,
        }
    }
}

impl ConvertOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the explicit target element
    pub fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }

    /// Get the expected count source
    pub fn expected_count(&self) -> ExpectedCount {
        self.expected_count
    }

    /// Check if the root element is verified against the schema
    pub fn verify_root(&self) -> bool {
        self.verify_root
    }

    /// Set the target element; empty names mean auto-detection
    pub fn with_element(mut self, element: Option<String>) -> Self {
        self.element = element.filter(|e| !e.is_empty());
        self
    }

    /// Set the expected count source
    pub fn with_expected_count(mut self, expected: ExpectedCount) -> Self {
        self.expected_count = expected;
        self
    }

    /// Set root verification
    pub fn with_verify_root(mut self, verify: bool) -> Self {
        self.verify_root = verify;
        self
    }
}
