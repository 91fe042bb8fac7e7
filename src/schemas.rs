//! XSD schema scanning
//!
//! A GAR schema is scanned once, as a flat token stream, for the two facts the
//! converter needs: the name of the first element declaration (the document
//! root) and, per element declaration, the attributes declared with
//! `use="required"`. No other part of XSD is interpreted.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, ParseError, Result};
use crate::names::start_local_name;
use crate::prefix::derive_prefix;

/// XSD element local names
mod xsd_elements {
    pub const ELEMENT: &str = "element";
    pub const ATTRIBUTE: &str = "attribute";
}

/// XSD attribute names
mod xsd_attrs {
    pub const NAME: &str = "name";
    pub const USE: &str = "use";
    pub const REQUIRED: &str = "required";
}

/// Element name -> sorted, deduplicated required attribute names
pub type RequiredAttributes = BTreeMap<String, BTreeSet<String>>;

/// Everything the converter knows about one schema file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    /// Source file location
    pub path: PathBuf,
    /// Canonical dataset key derived from the file name
    pub dataset_prefix: String,
    /// Expected top-level tag of matching data files
    pub root_element: String,
    /// Required attributes per element name
    pub required_attributes: RequiredAttributes,
}

impl SchemaDescriptor {
    /// Scan a schema file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let scan = scan_schema(BufReader::new(file))
            .map_err(|source| Error::schema_parse(path, source))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            dataset_prefix: derive_prefix(&file_name),
            root_element: scan.root_element,
            required_attributes: scan.required_attributes,
        })
    }

    /// Parse schema text held in memory; `name` plays the role of the file name
    pub fn from_string(name: &str, xsd: &str) -> Result<Self> {
        let scan =
            scan_schema(xsd.as_bytes()).map_err(|source| Error::schema_parse(name, source))?;
        Ok(Self {
            path: PathBuf::from(name),
            dataset_prefix: derive_prefix(name),
            root_element: scan.root_element,
            required_attributes: scan.required_attributes,
        })
    }

    /// Required attributes declared for an element, if any
    pub fn required_for(&self, element: &str) -> Option<&BTreeSet<String>> {
        self.required_attributes
            .get(element)
            .filter(|names| !names.is_empty())
    }
}

/// Result of scanning one schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaScan {
    /// Name of the first element declaration
    pub root_element: String,
    /// Required attributes per element name
    pub required_attributes: RequiredAttributes,
}

/// One open `<xs:element>` declaration
#[derive(Debug)]
struct ElementScope {
    /// Declared name; `None` for `ref=` declarations, which collect nothing
    name: Option<String>,
    required: BTreeSet<String>,
}

impl ElementScope {
    fn open(start: &BytesStart<'_>) -> std::result::Result<Self, ParseError> {
        Ok(Self {
            name: attribute_value(start, xsd_attrs::NAME)?.filter(|n| !n.is_empty()),
            required: BTreeSet::new(),
        })
    }
}

/// Scan an XSD token stream
pub fn scan_schema<R: BufRead>(input: R) -> std::result::Result<SchemaScan, ParseError> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();

    let mut root_element: Option<String> = None;
    let mut stack: Vec<ElementScope> = Vec::new();
    let mut required = RequiredAttributes::new();

    loop {
        buf.clear();
        let offset = reader.buffer_position() as u64;
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| ParseError::from(e).with_offset(offset))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let local = start_local_name(e).map_err(|err| err.with_offset(offset))?;

                if local == xsd_elements::ELEMENT {
                    let scope = ElementScope::open(e).map_err(|err| err.with_offset(offset))?;
                    if root_element.is_none() {
                        root_element = scope.name.clone();
                    }
                    if is_empty {
                        close_scope(scope, &mut required);
                    } else {
                        stack.push(scope);
                    }
                } else if local == xsd_elements::ATTRIBUTE {
                    // Attributes outside a named element declaration are not tracked
                    if let Some(current) = stack.last_mut().filter(|s| s.name.is_some()) {
                        let name = attribute_value(e, xsd_attrs::NAME)
                            .map_err(|err| err.with_offset(offset))?;
                        let usage = attribute_value(e, xsd_attrs::USE)
                            .map_err(|err| err.with_offset(offset))?;
                        if let (Some(name), Some(xsd_attrs::REQUIRED)) = (name, usage.as_deref()) {
                            if !name.is_empty() {
                                current.required.insert(name);
                            }
                        }
                    }
                }
            }
            Event::End(ref e) => {
                if e.local_name().as_ref() == xsd_elements::ELEMENT.as_bytes() {
                    if let Some(scope) = stack.pop() {
                        close_scope(scope, &mut required);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let root_element =
        root_element.ok_or_else(|| ParseError::new("no named element declaration found"))?;

    Ok(SchemaScan {
        root_element,
        required_attributes: required,
    })
}

fn close_scope(scope: ElementScope, required: &mut RequiredAttributes) {
    if let Some(name) = scope.name {
        if !scope.required.is_empty() {
            required.insert(name, scope.required);
        }
    }
}

/// Value of an attribute matched by local name
fn attribute_value(
    start: &BytesStart<'_>,
    name: &str,
) -> std::result::Result<Option<String>, ParseError> {
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ITEMS_XSD: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
    <xs:element name="ROOT">
        <xs:complexType>
            <xs:sequence>
                <xs:element name="ITEM">
                    <xs:complexType>
                        <xs:attribute name="NAME" use="required" />
                        <xs:attribute name="ID" use="required" />
                        <xs:attribute name="OPTIONAL" use="optional" />
                    </xs:complexType>
                </xs:element>
            </xs:sequence>
        </xs:complexType>
    </xs:element>
</xs:schema>"#;

    #[test]
    fn test_scan_required_attributes() {
        let scan = scan_schema(ITEMS_XSD.as_bytes()).unwrap();

        assert_eq!(scan.root_element, "ROOT");
        let mut expected = RequiredAttributes::new();
        expected.insert(
            "ITEM".to_string(),
            ["ID", "NAME"].iter().map(|s| s.to_string()).collect(),
        );
        assert_eq!(scan.required_attributes, expected);
    }

    #[test]
    fn test_required_names_are_sorted() {
        let scan = scan_schema(ITEMS_XSD.as_bytes()).unwrap();
        let names: Vec<&str> = scan.required_attributes["ITEM"]
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(names, vec!["ID", "NAME"]);
    }

    #[test]
    fn test_unprefixed_and_other_prefixes() {
        let xsd = r#"<schema xmlns="http://www.w3.org/2001/XMLSchema">
  <element name="HOUSES">
    <complexType><sequence>
      <element name="HOUSE" maxOccurs="unbounded">
        <complexType>
          <attribute name="OBJECTID" use="required"/>
        </complexType>
      </element>
    </sequence></complexType>
  </element>
</schema>"#;
        let scan = scan_schema(xsd.as_bytes()).unwrap();
        assert_eq!(scan.root_element, "HOUSES");
        assert!(scan.required_attributes["HOUSE"].contains("OBJECTID"));

        let xsd = r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <xsd:element name="HOUSES">
    <xsd:complexType><xsd:sequence>
      <xsd:element name="HOUSE" maxOccurs="unbounded">
        <xsd:complexType>
          <xsd:attribute name="OBJECTID" use="required"/>
        </xsd:complexType>
      </xsd:element>
    </xsd:sequence></xsd:complexType>
  </xsd:element>
</xsd:schema>"#;
        let scan = scan_schema(xsd.as_bytes()).unwrap();
        assert_eq!(scan.root_element, "HOUSES");
        assert!(scan.required_attributes["HOUSE"].contains("OBJECTID"));
    }

    #[test]
    fn test_required_scoped_to_innermost_element() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="OUTER">
    <xs:complexType>
      <xs:sequence>
        <xs:element name="INNER">
          <xs:complexType>
            <xs:attribute name="A" use="required"/>
          </xs:complexType>
        </xs:element>
      </xs:sequence>
      <xs:attribute name="B" use="required"/>
    </xs:complexType>
  </xs:element>
</xs:schema>"#;
        let scan = scan_schema(xsd.as_bytes()).unwrap();
        assert_eq!(scan.required_attributes.len(), 2);
        assert!(scan.required_attributes["INNER"].contains("A"));
        assert!(!scan.required_attributes["INNER"].contains("B"));
        assert!(scan.required_attributes["OUTER"].contains("B"));
    }

    #[test]
    fn test_ref_elements_collect_nothing() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="ROOT"/>
  <xs:element ref="ROOT">
    <xs:complexType>
      <xs:attribute name="A" use="required"/>
    </xs:complexType>
  </xs:element>
</xs:schema>"#;
        let scan = scan_schema(xsd.as_bytes()).unwrap();
        assert_eq!(scan.root_element, "ROOT");
        assert!(scan.required_attributes.is_empty());
    }

    #[test]
    fn test_no_element_declaration() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"/>"#;
        let err = scan_schema(xsd.as_bytes()).unwrap_err();
        assert!(err.message.contains("no named element declaration"));
    }

    #[test]
    fn test_malformed_schema() {
        let xsd = r#"<xs:schema><xs:element name="A"></xs:schema>"#;
        assert!(scan_schema(xsd.as_bytes()).is_err());
    }

    #[test]
    fn test_descriptor_from_str() {
        let schema = SchemaDescriptor::from_string("AS_ITEMS_2_251_01_04_01_01.xsd", ITEMS_XSD).unwrap();
        assert_eq!(schema.dataset_prefix, "AS_ITEMS");
        assert_eq!(schema.root_element, "ROOT");
        assert!(schema.required_for("ITEM").is_some());
        assert!(schema.required_for("ROOT").is_none());
    }
}
