//! XML document access
//!
//! Data files are never loaded whole: every pass opens its own buffered
//! pull reader, which is dropped (closing the file) on every exit path.

use crate::error::{Error, ParseError, Result};
use crate::names::start_local_name;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open a buffered pull reader over a file
pub fn open_reader(path: &Path) -> Result<Reader<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(Reader::from_reader(BufReader::new(file)))
}

/// Local name of the first start tag of a document
///
/// Returns `None` if the input ends before any element.
pub fn read_root<R: BufRead>(reader: &mut Reader<R>) -> std::result::Result<Option<String>, ParseError> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let offset = reader.buffer_position() as u64;
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return start_local_name(&e)
                    .map(Some)
                    .map_err(|err| err.with_offset(offset));
            }
            Ok(Event::Eof) => return Ok(None),
            Ok(_) => {}
            Err(e) => return Err(ParseError::from(e).with_offset(offset)),
        }
    }
}

/// Detect the root element of an XML file
pub fn detect_root(path: &Path) -> Result<String> {
    let mut reader = open_reader(path)?;
    read_root(&mut reader)
        .map_err(|source| Error::malformed(path, source))?
        .ok_or_else(|| Error::EmptyDocument {
            path: path.to_path_buf(),
        })
}
