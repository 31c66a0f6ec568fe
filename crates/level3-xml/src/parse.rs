//! Parsing response text into a [`Node`] tree.
//!
//! The reader keeps text verbatim (no trimming). Adjacent text, CDATA and
//! entity references merge into one text node. A text run made only of
//! whitespace is layout between elements and is not kept as a child, unless
//! it is the whole content of an element without child elements.
//! Comments, processing instructions, the declaration and the doctype are
//! skipped. Only whitespace, comments and processing instructions may follow
//! the document element.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use tracing::trace;

use crate::error::XmlError;
use crate::node::Node;

/// An element whose end tag has not been read yet.
struct OpenElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    pending_text: String,
}

impl OpenElement {
    fn start(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Self, XmlError> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| XmlError::Malformed(e.to_string()))?
            .to_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| XmlError::Malformed(e.to_string()))?
                .to_owned();
            let value = attr.decode_and_unescape_value(reader.decoder())?;
            attributes.push((key, value.into_owned()));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            pending_text: String::new(),
        })
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        if !text.trim().is_empty() {
            self.children.push(Node::text(text));
        }
    }

    fn finish(mut self) -> Node {
        if self.children.is_empty() && !self.pending_text.is_empty() {
            let text = std::mem::take(&mut self.pending_text);
            self.children.push(Node::text(text));
        } else {
            self.flush_text();
        }
        Node::element(self.name, self.attributes, self.children)
    }
}

/// Parse XML text and return its document element.
///
/// ```
/// use level3_xml::parse;
///
/// let root = parse("<?xml version=\"1.0\"?><a><p/><q/></a>").unwrap();
/// assert_eq!(root.tag_name(), "a");
/// assert_eq!(root.child_tag_names(), vec!["p", "q"]);
/// ```
///
/// # Errors
///
/// Returns an [`XmlError`] if the text is not well-formed XML or has no root element.
pub fn parse(xml: &str) -> Result<Node, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                reject_after_root(root.as_ref())?;
                if let Some(parent) = stack.last_mut() {
                    parent.flush_text();
                }
                stack.push(OpenElement::start(&e, &reader)?);
            }
            Event::Empty(e) => {
                reject_after_root(root.as_ref())?;
                let node = OpenElement::start(&e, &reader)?.finish();
                match stack.last_mut() {
                    Some(parent) => {
                        parent.flush_text();
                        parent.children.push(node);
                    }
                    None => root = Some(node),
                }
            }
            Event::End(_) => {
                let Some(open) = stack.pop() else {
                    return Err(XmlError::Malformed("unmatched end tag".to_owned()));
                };
                let node = open.finish();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root = Some(node),
                }
            }
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::Malformed(err.to_string()))?;
                let unescaped = quick_xml::escape::unescape(&decoded)
                    .map_err(|err| XmlError::Malformed(err.to_string()))?;
                if let Some(open) = stack.last_mut() {
                    open.pending_text.push_str(&unescaped);
                } else if !unescaped.trim().is_empty() {
                    reject_after_root(root.as_ref())?;
                }
            }
            Event::CData(e) => {
                if let Some(open) = stack.last_mut() {
                    let decoded = e
                        .decode()
                        .map_err(|err| XmlError::Malformed(err.to_string()))?;
                    open.pending_text.push_str(&decoded);
                } else {
                    reject_after_root(root.as_ref())?;
                }
            }
            Event::GeneralRef(e) => {
                let Some(open) = stack.last_mut() else {
                    reject_after_root(root.as_ref())?;
                    continue;
                };
                if let Some(ch) = e
                    .resolve_char_ref()
                    .map_err(|err| XmlError::Malformed(err.to_string()))?
                {
                    open.pending_text.push(ch);
                } else {
                    let name = e
                        .decode()
                        .map_err(|err| XmlError::Malformed(err.to_string()))?;
                    let resolved = resolve_predefined_entity(&name).ok_or_else(|| {
                        XmlError::Malformed(format!("unknown entity &{name};"))
                    })?;
                    open.pending_text.push_str(resolved);
                }
            }
            Event::Eof => {
                if !stack.is_empty() {
                    return Err(XmlError::Malformed(
                        "unexpected EOF inside element".to_owned(),
                    ));
                }
                let node = root.ok_or(XmlError::MissingRoot)?;
                trace!(root = %node.tag_name(), "Parsed response document");
                return Ok(node);
            }
            // Declaration, comments, processing instructions, doctype.
            _ => {}
        }
    }
}

fn reject_after_root(root: Option<&Node>) -> Result<(), XmlError> {
    match root {
        Some(node) => Err(XmlError::Malformed(format!(
            "content after document element <{}>",
            node.tag_name()
        ))),
        None => Ok(()),
    }
}
