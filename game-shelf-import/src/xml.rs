//! Generic XML to JSON conversion and catalog extraction.
//!
//! The conversion follows the common "xmltodict" layout:
//!
//! - an element becomes an object keyed by child element name
//! - attributes become `"@name"` keys
//! - an element holding only text becomes a string
//! - text next to attributes or children is stored under `"#text"`
//! - repeated child names collect into an array
//! - an empty element becomes `null`

use std::io::BufRead;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use crate::error::ImportError;

/// One entry of an exported games catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedGame {
    pub name: String,
    pub store_link: String,
    pub logo: String,
}

/// Convert an XML document into a JSON value.
pub fn xml_to_json<R: BufRead>(reader: R) -> Result<Value, ImportError> {
    let mut reader = Reader::from_reader(reader);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => stack.push(Frame::open(&e)?),
            Event::Empty(e) => {
                let frame = Frame::open(&e)?;
                close_frame(frame, &mut stack, &mut root)?;
            }
            Event::Text(e) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| ImportError::invalid_catalog("unexpected closing tag"))?;
                close_frame(frame, &mut stack, &mut root)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ImportError::invalid_catalog(format!(
            "unclosed element <{}>",
            open.name
        )));
    }

    let (name, value) =
        root.ok_or_else(|| ImportError::invalid_catalog("document has no root element"))?;
    let mut doc = Map::new();
    doc.insert(name, value);
    Ok(Value::Object(doc))
}

/// Read and convert an XML file.
pub fn xml_file_to_json(path: &Path) -> Result<Value, ImportError> {
    let file = std::fs::File::open(path)?;
    xml_to_json(std::io::BufReader::new(file))
}

/// Pull the games out of a converted catalog document.
///
/// Expects `gamesList.games.game`, holding either one entry or an array.
/// Entries without a name are skipped.
pub fn games_from_document(doc: &Value) -> Result<Vec<ImportedGame>, ImportError> {
    let games = doc
        .get("gamesList")
        .and_then(|v| v.get("games"))
        .ok_or_else(|| ImportError::invalid_catalog("missing gamesList/games element"))?;

    let entries: Vec<&Value> = match games.get("game") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(entry) => vec![entry],
        None => Vec::new(),
    };

    let mut imported = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = text_field(entry, "name");
        if name.is_empty() {
            log::warn!("Skipping catalog entry without a name");
            continue;
        }
        imported.push(ImportedGame {
            name,
            store_link: text_field(entry, "storeLink"),
            logo: text_field(entry, "logo"),
        });
    }
    Ok(imported)
}

fn text_field(entry: &Value, key: &str) -> String {
    let text = match entry.get(key) {
        Some(Value::String(s)) => s.as_str(),
        Some(Value::Object(fields)) => fields.get("#text").and_then(Value::as_str).unwrap_or(""),
        _ => "",
    };
    text.trim().to_string()
}

// ── Conversion State ────────────────────────────────────────────────────────

struct Frame {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(e: &BytesStart<'_>) -> Result<Self, ImportError> {
        let mut fields = Map::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
            fields.insert(key, Value::String(attr.unescape_value()?.into_owned()));
        }
        Ok(Self {
            name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
            fields,
            text: String::new(),
        })
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(text);
    }

    fn into_entry(self) -> (String, Value) {
        let value = if self.fields.is_empty() {
            if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text)
            }
        } else {
            let mut fields = self.fields;
            if !self.text.is_empty() {
                fields.insert("#text".to_string(), Value::String(self.text));
            }
            Value::Object(fields)
        };
        (self.name, value)
    }
}

fn close_frame(
    frame: Frame,
    stack: &mut [Frame],
    root: &mut Option<(String, Value)>,
) -> Result<(), ImportError> {
    let (name, value) = frame.into_entry();
    if let Some(parent) = stack.last_mut() {
        insert_child(&mut parent.fields, name, value);
    } else if root.is_some() {
        return Err(ImportError::invalid_catalog("multiple root elements"));
    } else {
        *root = Some((name, value));
    }
    Ok(())
}

// Element values are never arrays themselves, so an array here always means
// the name has repeated.
fn insert_child(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(name, value);
        }
    }
}
