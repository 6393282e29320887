use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde_json::Value;

use crate::error::{Result, TripitError};

/// Response body encoding requested through the `format` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Xml,
    Json,
}

impl Format {
    /// `json` (any case) selects JSON, anything else falls back to XML
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            Format::Json
        } else {
            Format::Xml
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Xml => "xml",
            Format::Json => "json",
        }
    }
}

/// A generic XML element tree
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    /// Concatenated text and CDATA content directly inside this element
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Walk a slash-separated path of child names.
    /// A numeric segment selects the n-th child with the previous name,
    /// e.g. "Trip/1/display_name".
    pub fn get(&self, path: &str) -> Option<&XmlElement> {
        let mut parent: Option<&XmlElement> = None;
        let mut current = self;

        for part in path.split('/').filter(|s| !s.is_empty()) {
            match (part.parse::<usize>(), parent) {
                (Ok(index), Some(p)) => {
                    current = p.children_named(&current.name).nth(index)?;
                }
                _ => {
                    let next = current.child(part)?;
                    parent = Some(current);
                    current = next;
                }
            }
        }

        Some(current)
    }
}

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Xml(XmlElement),
    Json(Value),
}

impl Document {
    /// Decode a body in the given format
    pub fn parse(format: Format, body: &[u8]) -> Result<Self> {
        match format {
            Format::Json => Ok(Document::Json(parse_json(body)?)),
            Format::Xml => Ok(Document::Xml(parse_xml(body)?)),
        }
    }

    pub fn as_xml(&self) -> Option<&XmlElement> {
        match self {
            Document::Xml(root) => Some(root),
            Document::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Document::Json(value) => Some(value),
            Document::Xml(_) => None,
        }
    }
}

/// Response represents a decoded API response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Decoded body
    pub document: Document,
}

impl Response {
    pub fn format(&self) -> Format {
        match self.document {
            Document::Xml(_) => Format::Xml,
            Document::Json(_) => Format::Json,
        }
    }

    /// Get a value from the response by a slash-separated path.
    /// For JSON, objects are indexed by key and arrays by position; for XML,
    /// segments name child elements below the root.
    pub fn get(&self, path: &str) -> Option<Value> {
        match &self.document {
            Document::Json(value) => json_path(value, path).cloned(),
            Document::Xml(root) => root.get(path).map(|e| Value::String(e.text.clone())),
        }
    }

    /// Get a string value from the response by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        match &self.document {
            Document::Json(value) => json_path(value, path)
                .and_then(|v| v.as_str())
                .map(str::to_string),
            Document::Xml(root) => root.get(path).map(|e| e.text.clone()),
        }
    }

    /// Unmarshal a JSON response into the provided type
    pub fn apply<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        match &self.document {
            Document::Json(value) => Ok(serde_json::from_value(value.clone())?),
            Document::Xml(_) => Err(TripitError::configuration(
                "typed decoding requires a JSON response",
            )),
        }
    }
}

fn json_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for part in path.split('/').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(arr) => {
                let index: usize = part.parse().ok()?;
                arr.get(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Parse a JSON body into a generic tree
pub fn parse_json(body: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(body)?)
}

/// Parse an XML body into an element tree
///
/// The document must have exactly one root element and be well formed.
pub fn parse_xml(body: &[u8]) -> Result<XmlElement> {
    let mut reader = Reader::from_reader(body);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_error(&reader, e))?;

        match event {
            Event::Start(start) => {
                ensure_single_root(&root)?;
                stack.push(element_from(&start)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&root)?;
                let element = element_from(&start)?;
                close_element(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                // end-name mismatches are reported by the reader
                let element = stack
                    .pop()
                    .ok_or_else(|| TripitError::Xml("unexpected closing tag".to_string()))?;
                close_element(element, &mut stack, &mut root);
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| xml_error(&reader, e))?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(&text),
                    None => {
                        return Err(TripitError::Xml(format!(
                            "text outside of root element: {:?}",
                            text
                        )))
                    }
                }
            }
            Event::CData(data) => {
                let data = data.into_inner();
                let current = stack.last_mut().ok_or_else(|| {
                    TripitError::Xml("CDATA outside of root element".to_string())
                })?;
                current.text.push_str(&String::from_utf8_lossy(&data));
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(TripitError::Xml(format!(
            "unexpected end of document inside <{}>",
            stack.last().map(|e| e.name.as_str()).unwrap_or_default()
        )));
    }

    root.ok_or_else(|| TripitError::Xml("document has no root element".to_string()))
}

fn ensure_single_root(root: &Option<XmlElement>) -> Result<()> {
    match root {
        Some(existing) => Err(TripitError::Xml(format!(
            "content after root element <{}>",
            existing.name
        ))),
        None => Ok(()),
    }
}

fn close_element(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn element_from(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = IndexMap::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| TripitError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| TripitError::Xml(e.to_string()))?
            .into_owned();
        attributes.insert(key, value);
    }

    Ok(XmlElement {
        name,
        attributes,
        ..XmlElement::default()
    })
}

fn xml_error(reader: &Reader<&[u8]>, err: quick_xml::Error) -> TripitError {
    TripitError::Xml(format!("{} at position {}", err, reader.buffer_position()))
}
