//! XML name utilities
//!
//! Tag names are compared by local name only: any namespace prefix is
//! dropped before comparison.

use crate::error::ParseError;
use quick_xml::events::BytesStart;

/// Local name of a start tag as an owned string
pub fn start_local_name(start: &BytesStart<'_>) -> Result<String, ParseError> {
    std::str::from_utf8(start.local_name().as_ref())
        .map(str::to_string)
        .map_err(|e| ParseError::new(format!("invalid element name: {}", e)))
}
