//! Record conversion
//!
//! A [`Record`] is the flat view of one target element: its local name, its
//! attributes and its direct text. Records are handed to a [`RecordSink`] one
//! at a time, in document order, and never accumulated by the decoder.
//!
//! Serialized shape:
//!
//! ```json
//! {"element": "HOUSE", "attributes": {"ID": "1"}, "content": "Main"}
//! ```
//!
//! `content` is omitted when the element has no direct text.

mod json_lines;

pub use json_lines::JsonLinesSink;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Type alias for attribute mappings, in document order
pub type AttributeMap = IndexMap<String, String>;

/// One extracted element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Element local name
    pub element: String,
    /// Attribute local name -> value
    pub attributes: AttributeMap,
    /// Whitespace-normalized direct text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
}

impl Record {
    /// Create an empty record for an element
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            ..Default::default()
        }
    }

    /// Append a text fragment: trimmed, joined to earlier text by one space
    pub fn push_text(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        if !self.content.is_empty() {
            self.content.push(' ');
        }
        self.content.push_str(fragment);
    }

    /// Required attributes absent from this record
    pub fn missing_attributes<'a, I>(&self, required: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        required
            .into_iter()
            .filter(|name| !self.attributes.contains_key(name.as_str()))
            .cloned()
            .collect()
    }
}

/// Destination for validated records
pub trait RecordSink {
    /// Consume one record
    fn emit(&mut self, record: &Record) -> Result<()>;

    /// Flush buffered output
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn emit(&mut self, record: &Record) -> Result<()> {
        (**self).emit(record)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Sink that keeps every record in memory
#[derive(Debug, Default)]
pub struct VecSink {
    /// Records received so far
    pub records: Vec<Record>,
}

impl VecSink {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for VecSink {
    fn emit(&mut self, record: &Record) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
