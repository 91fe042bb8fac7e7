//! Streaming element decoder
//!
//! The decoder walks a document once, token by token, and only ever looks
//! at the children of the root element:
//!
//! - `AtRoot`: nothing read yet; the first start tag is the document root
//!   and is never a target itself.
//! - `ScanningChildren`: inside the root. Every child start tag is compared
//!   with the target name. A matching child is turned into a [`Record`]; any
//!   other child is skipped wholesale.
//! - `Finished`: the root has closed.
//!
//! Inside a target element only its attributes and its direct text are
//! kept. Nested elements are skipped with their whole subtree.
//!
//! Record-level problems (missing required attributes, a broken token or a
//! mismatched end tag inside one element) produce a [`SkippedRecord`] and the
//! walk continues with the next sibling. Token errors anywhere else abort the
//! file, as does input that ends inside a target element.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::converters::{Record, RecordSink};
use crate::documents::open_reader;
use crate::error::{Error, ParseError, Result, ValidationError};
use crate::names::start_local_name;
use crate::schemas::RequiredAttributes;

/// Target element selection
///
/// Starts `Unresolved` when no element name was given; the first child of the
/// root then latches its name for the rest of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Not chosen yet
    Unresolved,
    /// Element local name to extract
    Resolved(String),
}

impl Target {
    /// Target from an optional explicit name
    pub fn new(element: Option<&str>) -> Self {
        match element {
            Some(name) if !name.is_empty() => Self::Resolved(name.to_string()),
            _ => Self::Unresolved,
        }
    }

    /// Resolved name, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Unresolved => None,
            Self::Resolved(name) => Some(name),
        }
    }

    /// Compare a child name with the target, latching it if unresolved
    pub fn matches(&mut self, name: &str) -> bool {
        match self {
            Self::Resolved(target) => target == name,
            Self::Unresolved => {
                debug!(element = name, "target element detected");
                *self = Self::Resolved(name.to_string());
                true
            }
        }
    }
}

/// A target element instance that was not emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based ordinal among target elements in the file
    pub index: usize,
    /// Byte position of the element's start tag
    pub byte_offset: u64,
    /// Element local name
    pub element: String,
    /// Cause
    pub error: String,
}

/// Outcome of streaming one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamResult {
    /// Expected record count, when known
    pub expected: Option<usize>,
    /// Records emitted
    pub processed: usize,
    /// Records skipped, in document order
    pub skipped: Vec<SkippedRecord>,
}

impl StreamResult {
    /// Target elements encountered (emitted or skipped)
    pub fn attempted(&self) -> usize {
        self.processed + self.skipped.len()
    }

    /// Expected count, if it differs from the emitted count
    pub fn count_mismatch(&self) -> Option<usize> {
        self.expected.filter(|&expected| expected != self.processed)
    }
}

/// Decoder position relative to the root element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AtRoot,
    ScanningChildren,
    Finished,
}

/// Start tag of a child of the root
#[derive(Debug)]
struct ChildTag {
    start: BytesStart<'static>,
    name: String,
    empty: bool,
    offset: u64,
}

/// Pull decoder over one document
pub struct ElementStream<R: BufRead> {
    reader: Reader<R>,
    source: PathBuf,
    buf: Vec<u8>,
    skip_buf: Vec<u8>,
    state: State,
    target: Target,
}

impl ElementStream<BufReader<File>> {
    /// Open a file for streaming
    pub fn open(path: &Path, target: Target) -> Result<Self> {
        Ok(Self::new(open_reader(path)?, path, target))
    }
}

impl<R: BufRead> ElementStream<R> {
    /// Wrap a reader; `source` names the input in errors
    pub fn new(reader: Reader<R>, source: impl Into<PathBuf>, target: Target) -> Self {
        Self {
            reader,
            source: source.into(),
            buf: Vec::new(),
            skip_buf: Vec::new(),
            state: State::AtRoot,
            target,
        }
    }

    /// Current target selection
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Count target elements without extracting them
    pub fn count(&mut self) -> Result<usize> {
        let mut count = 0;
        while let Some(child) = self.next_child()? {
            if self.target.matches(&child.name) {
                count += 1;
                self.read_body(&child, None)?;
            } else {
                self.skip_child(&child)?;
            }
        }
        Ok(count)
    }

    /// Extract, validate and emit every target element
    pub fn run(
        &mut self,
        required: &RequiredAttributes,
        expected: Option<usize>,
        sink: &mut dyn RecordSink,
    ) -> Result<StreamResult> {
        let mut result = StreamResult {
            expected,
            ..Default::default()
        };
        let mut index = 0;

        while let Some(child) = self.next_child()? {
            if !self.target.matches(&child.name) {
                self.skip_child(&child)?;
                continue;
            }
            index += 1;

            let record = match self.read_record(&child)? {
                Ok(record) => record,
                Err(err) => {
                    debug!(element = %child.name, offset = child.offset, error = %err, "broken record");
                    result.skipped.push(skipped(index, &child, err.to_string()));
                    continue;
                }
            };

            if let Some(names) = required.get(&record.element) {
                let missing = record.missing_attributes(names);
                if !missing.is_empty() {
                    let err = ValidationError::missing_attributes(&record.element, missing);
                    result.skipped.push(skipped(index, &child, err.to_string()));
                    continue;
                }
            }

            sink.emit(&record)?;
            result.processed += 1;
        }

        Ok(result)
    }

    /// Advance to the next child of the root; `None` once the root closes
    fn next_child(&mut self) -> Result<Option<ChildTag>> {
        // A text event has already consumed the `<` of the tag after it.
        let mut after_text = false;
        loop {
            if self.state == State::Finished {
                return Ok(None);
            }

            self.buf.clear();
            let offset = (self.reader.buffer_position() as u64).saturating_sub(after_text as u64);
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|e| Error::malformed(&self.source, ParseError::from(e).with_offset(offset)))?;
            after_text = matches!(event, Event::Text(_));

            let (start, empty) = match (self.state, event) {
                (State::AtRoot, Event::Start(_)) => {
                    self.state = State::ScanningChildren;
                    continue;
                }
                (State::AtRoot, Event::Empty(_)) => {
                    self.state = State::Finished;
                    continue;
                }
                (State::AtRoot, Event::Eof) => {
                    return Err(Error::EmptyDocument {
                        path: self.source.clone(),
                    })
                }
                (State::ScanningChildren, Event::Start(e)) => (e, false),
                (State::ScanningChildren, Event::Empty(e)) => (e, true),
                (State::ScanningChildren, Event::End(_)) => {
                    self.state = State::Finished;
                    continue;
                }
                (State::ScanningChildren, Event::Eof) => {
                    return Err(Error::malformed(
                        &self.source,
                        ParseError::new("unexpected end of input: root element is not closed")
                            .with_offset(offset),
                    ))
                }
                _ => continue,
            };

            let name = start_local_name(&start)
                .map_err(|err| Error::malformed(&self.source, err.with_offset(offset)))?;
            return Ok(Some(ChildTag {
                start: start.into_owned(),
                name,
                empty,
                offset,
            }));
        }
    }

    /// Consume a non-target child's subtree
    fn skip_child(&mut self, child: &ChildTag) -> Result<()> {
        if child.empty {
            return Ok(());
        }
        self.skip_buf.clear();
        let position = self.reader.buffer_position() as u64;
        self.reader
            .read_to_end_into(child.start.name(), &mut self.skip_buf)
            .map_err(|e| Error::malformed(&self.source, ParseError::from(e).with_offset(position)))?;
        Ok(())
    }

    /// Build the record for a target child
    ///
    /// The outer error is fatal for the file; the inner one marks the record
    /// as broken after it has been consumed through its end tag.
    fn read_record(&mut self, child: &ChildTag) -> Result<std::result::Result<Record, ParseError>> {
        let mut record = Record::new(child.name.clone());
        let attributes = read_attributes(&child.start, &mut record)
            .map_err(|err| err.with_offset(child.offset));
        let body = self.read_body(child, Some(&mut record))?;

        Ok(match attributes.err().or(body) {
            Some(problem) => Err(problem),
            None => Ok(record),
        })
    }

    /// Consume a target child through its end tag, collecting direct text
    ///
    /// End-tag names are not enforced by the reader inside a target: nesting
    /// is tracked here so a mismatched tag breaks this record only. Returns
    /// the first record-level problem; running out of input is fatal.
    fn read_body(
        &mut self,
        child: &ChildTag,
        record: Option<&mut Record>,
    ) -> Result<Option<ParseError>> {
        if child.empty {
            return Ok(None);
        }
        self.reader.check_end_names(false);
        let outcome = self.read_body_unchecked(child, record);
        self.reader.check_end_names(true);
        outcome
    }

    fn read_body_unchecked(
        &mut self,
        child: &ChildTag,
        mut record: Option<&mut Record>,
    ) -> Result<Option<ParseError>> {
        let mut problem: Option<ParseError> = None;
        let mut open: Vec<Vec<u8>> = Vec::new();

        loop {
            self.buf.clear();
            let offset = self.reader.buffer_position() as u64;
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => {
                    let err = ParseError::from(e).with_offset(offset);
                    if self.reader.buffer_position() as u64 == offset {
                        return Err(unrecoverable(&self.source, child, &err, offset));
                    }
                    problem.get_or_insert(err);
                    continue;
                }
            };

            match event {
                Event::Start(e) => open.push(e.name().into_inner().to_vec()),
                Event::End(e) => {
                    let expected = open.pop();
                    let expected_name = match &expected {
                        Some(name) => name.as_slice(),
                        None => child.start.name().into_inner(),
                    };
                    let found = e.name().into_inner();
                    if found != expected_name && problem.is_none() {
                        problem = Some(
                            ParseError::new(format!(
                                "expected </{}> but found </{}>",
                                String::from_utf8_lossy(expected_name),
                                String::from_utf8_lossy(found)
                            ))
                            .with_offset(offset),
                        );
                    }
                    if expected.is_none() {
                        return Ok(problem);
                    }
                }
                Event::Text(text) if open.is_empty() => {
                    if let Some(record) = record.as_deref_mut() {
                        match text.unescape() {
                            Ok(text) => record.push_text(&text),
                            Err(e) => {
                                problem.get_or_insert(ParseError::from(e).with_offset(offset));
                            }
                        }
                    }
                }
                Event::CData(data) if open.is_empty() => {
                    if let Some(record) = record.as_deref_mut() {
                        match std::str::from_utf8(&data) {
                            Ok(text) => record.push_text(text),
                            Err(e) => {
                                problem.get_or_insert(
                                    ParseError::new(format!("invalid CDATA text: {}", e))
                                        .with_offset(offset),
                                );
                            }
                        }
                    }
                }
                Event::Eof => {
                    let cause = problem.unwrap_or_else(|| ParseError::new("unexpected end of input"));
                    return Err(unrecoverable(&self.source, child, &cause, offset));
                }
                _ => {}
            }
        }
    }
}

/// Copy a target's attributes into its record, namespace declarations aside
fn read_attributes(start: &BytesStart<'_>, record: &mut Record) -> std::result::Result<(), ParseError> {
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = std::str::from_utf8(attr.key.local_name().into_inner())
            .map_err(|e| ParseError::new(format!("invalid attribute name: {}", e)))?
            .to_string();
        let value = attr.unescape_value()?.into_owned();
        record.attributes.insert(key, value);
    }
    Ok(())
}

fn unrecoverable(source: &Path, child: &ChildTag, cause: &ParseError, offset: u64) -> Error {
    Error::malformed(
        source,
        ParseError::new(format!(
            "cannot recover from broken element {}: {}",
            child.name, cause.message
        ))
        .with_offset(offset),
    )
}

fn skipped(index: usize, child: &ChildTag, error: String) -> SkippedRecord {
    SkippedRecord {
        index,
        byte_offset: child.offset,
        element: child.name.clone(),
        error,
    }
}

/// Count target elements in a file
///
/// Returns the count and the resolved target name (`None` if the root has
/// no children and no name was given).
pub fn count_elements(path: &Path, element: Option<&str>) -> Result<(usize, Option<String>)> {
    let mut stream = ElementStream::open(path, Target::new(element))?;
    let count = stream.count()?;
    Ok((count, stream.target().name().map(str::to_string)))
}

/// Stream a file's target elements into a sink
pub fn stream_elements(
    path: &Path,
    element: Option<&str>,
    expected: Option<usize>,
    required: &RequiredAttributes,
    sink: &mut dyn RecordSink,
) -> Result<StreamResult> {
    let mut stream = ElementStream::open(path, Target::new(element))?;
    stream.run(required, expected, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::VecSink;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn required(element: &str, names: &[&str]) -> RequiredAttributes {
        let mut map = RequiredAttributes::new();
        map.insert(
            element.to_string(),
            names.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        );
        map
    }

    fn stream<'a>(xml: &'a str, element: Option<&str>) -> ElementStream<&'a [u8]> {
        ElementStream::new(Reader::from_reader(xml.as_bytes()), "test.xml", Target::new(element))
    }

    fn run(xml: &str, element: Option<&str>, req: &RequiredAttributes) -> (Result<StreamResult>, Vec<Record>) {
        let mut sink = VecSink::new();
        let result = stream(xml, element).run(req, None, &mut sink);
        (result, sink.records)
    }

    const HOUSES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<HOUSES>
  <HOUSE ID="1" OBJECTID="10">
    Main
    <PARAMS><PARAM TYPE="5">ignored</PARAM></PARAMS>
    street
  </HOUSE>
  <HOUSE ID="2" OBJECTID="20"/>
</HOUSES>"#;

    #[test]
    fn test_default_target_is_first_child() {
        let (result, records) = run(HOUSES, None, &RequiredAttributes::new());
        let result = result.unwrap();

        assert_eq!(result.processed, 2);
        assert!(result.skipped.is_empty());
        assert_eq!(records[0].element, "HOUSE");
        assert_eq!(records[0].attributes["ID"], "1");
        assert_eq!(records[0].content, "Main street");
        assert_eq!(records[1].attributes["OBJECTID"], "20");
        assert_eq!(records[1].content, "");
    }

    proptest! {
        #[test]
        fn prop_well_formed_targets_all_emitted(
            items in proptest::collection::vec((0u32..10_000, any::<bool>(), "[a-z]{0,8}"), 0..40),
        ) {
            let mut xml = String::from("<ROOT>\n");
            for (id, nested, text) in &items {
                if *nested {
                    xml.push_str(&format!("  <ITEM ID=\"{}\">{}<SUB K=\"v\"><ITEM ID=\"x\"/></SUB></ITEM>\n", id, text));
                } else {
                    xml.push_str(&format!("  <ITEM ID=\"{}\">{}</ITEM>\n", id, text));
                }
            }
            xml.push_str("</ROOT>");

            let (result, records) = run(&xml, None, &required("ITEM", &["ID"]));
            let result = result.unwrap();
            prop_assert_eq!(result.processed, items.len());
            prop_assert!(result.skipped.is_empty());
            prop_assert_eq!(stream(&xml, None).count().unwrap(), items.len());

            for (record, (id, _, text)) in records.iter().zip(&items) {
                prop_assert_eq!(&record.attributes["ID"], &id.to_string());
                prop_assert_eq!(&record.content, text);
            }
        }
    }

    #[test]
    fn test_explicit_target_skips_other_children() {
        let xml = r#"<ADDRESSOBJECTS>
  <META VERSION="1"><OBJECT ID="99"/></META>
  <OBJECT ID="1" NAME="A"/>
  <OTHER/>
  <OBJECT ID="2" NAME="B">text</OBJECT>
</ADDRESSOBJECTS>"#;
        let (result, records) = run(xml, Some("OBJECT"), &RequiredAttributes::new());

        assert_eq!(result.unwrap().processed, 2);
        let ids: Vec<&str> = records.iter().map(|r| r.attributes["ID"].as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(records[1].content, "text");
    }

    #[test]
    fn test_latched_target_ignores_later_names() {
        let xml = "<ROOT><A N=\"1\"/><B N=\"2\"/><A N=\"3\"/></ROOT>";
        let mut s = stream(xml, None);
        let mut sink = VecSink::new();
        let result = s.run(&RequiredAttributes::new(), None, &mut sink).unwrap();

        assert_eq!(result.processed, 2);
        assert_eq!(s.target(), &Target::Resolved("A".to_string()));
        assert!(sink.records.iter().all(|r| r.element == "A"));
    }

    #[test]
    fn test_missing_required_attribute_is_skipped() {
        let xml = r#"<?xml version="1.0"?>
<ROOT>
        <ITEM ID="1" NAME="Valid" />
        <ITEM NAME="MissingID" />
</ROOT>"#;
        let (result, records) = run(xml, Some("ITEM"), &required("ITEM", &["ID", "NAME"]));
        let result = result.unwrap();

        assert_eq!(result.processed, 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].element, "ITEM");

        let skipped = &result.skipped[0];
        assert_eq!(skipped.index, 2);
        assert_eq!(skipped.element, "ITEM");
        assert_eq!(skipped.error, "missing required attribute ID");
        assert_eq!(result.attempted(), 2);
    }

    #[test]
    fn test_skip_offsets_increase_and_point_at_tag() {
        let xml = "<ROOT>\n  <ITEM/>\n  <ITEM A=\"1\"/>\n  <ITEM/>\n</ROOT>";
        let (result, _) = run(xml, None, &required("ITEM", &["A"]));
        let result = result.unwrap();

        assert_eq!(result.processed, 1);
        let offsets: Vec<u64> = result.skipped.iter().map(|s| s.byte_offset).collect();
        let tags: Vec<u64> = xml.match_indices("<ITEM").map(|(i, _)| i as u64).collect();
        assert_eq!(offsets, vec![tags[0], tags[2]]);
        assert_eq!(result.skipped[0].index, 1);
        assert_eq!(result.skipped[1].index, 3);
    }

    #[test]
    fn test_skip_offsets_without_whitespace() {
        let xml = "<ROOT><ITEM/><ITEM A=\"1\">x</ITEM><ITEM/></ROOT>";
        let (result, _) = run(xml, None, &required("ITEM", &["A"]));
        let offsets: Vec<u64> = result.unwrap().skipped.iter().map(|s| s.byte_offset).collect();
        let tags: Vec<u64> = xml.match_indices("<ITEM").map(|(i, _)| i as u64).collect();
        assert_eq!(offsets, vec![tags[0], tags[2]]);
    }

    #[test]
    fn test_required_rules_only_for_declared_elements() {
        let xml = "<ROOT><ITEM/><ITEM/></ROOT>";
        let (result, _) = run(xml, None, &required("OTHER", &["ID"]));
        assert_eq!(result.unwrap().processed, 2);
    }

    #[test]
    fn test_broken_record_is_skipped_and_stream_continues() {
        let xml = r#"<ROOT>
  <ITEM ID="1">good</ITEM>
  <ITEM ID="2">bad &bogus; entity</ITEM>
  <ITEM ID="3" ID="3"/>
  <ITEM ID="4">also good</ITEM>
</ROOT>"#;
        let (result, records) = run(xml, None, &RequiredAttributes::new());
        let result = result.unwrap();

        assert_eq!(result.processed, 2);
        assert_eq!(result.skipped.len(), 2);
        assert_eq!(result.skipped[0].index, 2);
        assert_eq!(result.skipped[1].index, 3);
        let ids: Vec<&str> = records.iter().map(|r| r.attributes["ID"].as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_mismatched_end_tag_inside_record_is_skipped() {
        let xml = r#"<HOUSES>
  <HOUSE ID="1"/>
  <HOUSE ID="2"><A></B></HOUSE>
  <HOUSE ID="3">kept</HOUSE>
</HOUSES>"#;
        let (result, records) = run(xml, None, &RequiredAttributes::new());
        let result = result.unwrap();

        assert_eq!(result.processed, 2);
        assert_eq!(result.skipped.len(), 1);
        let skipped = &result.skipped[0];
        assert_eq!(skipped.index, 2);
        assert_eq!(skipped.byte_offset, xml.find("<HOUSE ID=\"2\"").unwrap() as u64);
        assert!(skipped.error.starts_with("expected </A> but found </B>"), "{}", skipped.error);

        let ids: Vec<&str> = records.iter().map(|r| r.attributes["ID"].as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(records[1].content, "kept");

        assert_eq!(stream(xml, None).count().unwrap(), 3);
    }

    #[test]
    fn test_unrecoverable_record_is_fatal() {
        let xml = "<ROOT><ITEM ID=\"1\">&bogus;";
        let (result, records) = run(xml, None, &RequiredAttributes::new());
        assert!(matches!(result, Err(Error::MalformedXml { .. })));
        assert!(records.is_empty());
    }

    #[test]
    fn test_malformed_outside_record_is_fatal() {
        let xml = "<ROOT><META><A></B></META><ITEM/></ROOT>";
        let (result, _) = run(xml, Some("ITEM"), &RequiredAttributes::new());
        assert!(matches!(result, Err(Error::MalformedXml { .. })));
    }

    #[test]
    fn test_unclosed_root_is_fatal() {
        let xml = "<ROOT><ITEM ID=\"1\"/>";
        let (result, records) = run(xml, None, &RequiredAttributes::new());
        assert!(matches!(result, Err(Error::MalformedXml { .. })));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_empty_root_and_empty_document() {
        let (result, _) = run("<ROOT/>", None, &RequiredAttributes::new());
        assert_eq!(result.unwrap().processed, 0);

        let (result, _) = run("<?xml version=\"1.0\"?>", None, &RequiredAttributes::new());
        assert!(matches!(result, Err(Error::EmptyDocument { .. })));
    }

    #[test]
    fn test_namespaces_and_cdata() {
        let xml = r#"<gar:ROOT xmlns:gar="urn:gar">
  <gar:ITEM gar:ID="1" xmlns:x="urn:x" NAME="a &amp; b"><![CDATA[raw <text>]]></gar:ITEM>
</gar:ROOT>"#;
        let (result, records) = run(xml, Some("ITEM"), &required("ITEM", &["ID"]));

        assert_eq!(result.unwrap().processed, 1);
        let record = &records[0];
        assert_eq!(record.element, "ITEM");
        assert_eq!(record.attributes.len(), 2);
        assert_eq!(record.attributes["ID"], "1");
        assert_eq!(record.attributes["NAME"], "a & b");
        assert_eq!(record.content, "raw <text>");
    }

    #[test]
    fn test_count_agrees_with_extraction() {
        let xml = "<ROOT><A/><B/><A X=\"1\"/><A><C/></A></ROOT>";
        let mut counter = stream(xml, None);
        assert_eq!(counter.count().unwrap(), 3);
        assert_eq!(counter.target().name(), Some("A"));

        let mut sink = VecSink::new();
        let result = stream(xml, None)
            .run(&required("A", &["X"]), Some(3), &mut sink)
            .unwrap();
        assert_eq!(result.attempted(), 3);
        assert_eq!(result.processed, 1);
        assert_eq!(result.count_mismatch(), Some(3));
    }

    #[test]
    fn test_count_explicit_target() {
        let xml = "<ROOT><A/><B/><B><B/></B></ROOT>";
        assert_eq!(stream(xml, Some("B")).count().unwrap(), 2);
        assert_eq!(stream(xml, Some("Z")).count().unwrap(), 0);
    }

    #[test]
    fn test_target_latch() {
        let mut target = Target::new(None);
        assert_eq!(target.name(), None);
        assert!(target.matches("HOUSE"));
        assert!(!target.matches("PARAM"));
        assert!(target.matches("HOUSE"));
        assert_eq!(Target::new(Some("")), Target::Unresolved);
    }
}
