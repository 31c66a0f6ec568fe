//! Serializing a [`Node`] subtree back to XML.
//!
//! Output has no declaration and no indentation. Attributes are written in
//! document order, elements without children as `<tag/>`, and text and
//! attribute values are escaped. Rendering and reparsing yields an equal tree.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::XmlError;
use crate::node::Node;

impl Node {
    /// Serialize this node and everything below it.
    ///
    /// ```
    /// use level3_xml::parse;
    ///
    /// let root = parse(r#"<a x="1"><p/>hi</a>"#).unwrap();
    /// assert_eq!(root.render().unwrap(), r#"<a x="1"><p/>hi</a>"#);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`XmlError`] if writing fails.
    pub fn render(&self) -> Result<String, XmlError> {
        let mut buf = Vec::with_capacity(256);
        let mut writer = Writer::new(&mut buf);
        write_node(&mut writer, self)?;
        String::from_utf8(buf).map_err(|e| XmlError::Malformed(e.to_string()))
    }
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> io::Result<()> {
    if node.is_text() {
        let text = node.text_content().unwrap_or_default();
        return writer.write_event(Event::Text(BytesText::new(text)));
    }

    let mut start = BytesStart::new(node.tag_name());
    for (key, value) in node.attributes() {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.is_empty() {
        return writer.write_event(Event::Empty(start));
    }

    writer.write_event(Event::Start(start))?;
    for child in node.children() {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.tag_name())))
}
