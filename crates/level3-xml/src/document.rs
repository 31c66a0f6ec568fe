//! A parsed response body together with its raw text.

use crate::error::XmlError;
use crate::node::{Key, Lookup, Node};
use crate::parse::parse;

/// A parsed response, exposing the document element under its own tag name.
///
/// ```
/// use level3_xml::XmlDocument;
///
/// let doc = XmlDocument::parse("<accessGroup><metros/></accessGroup>").unwrap();
/// assert!(doc.get("accessGroup").is_some());
/// assert!(doc.get("metros").is_none());
/// assert_eq!(doc.raw(), "<accessGroup><metros/></accessGroup>");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    raw: String,
    root: Node,
}

impl XmlDocument {
    /// Parse a response body.
    ///
    /// # Errors
    ///
    /// Returns an [`XmlError`] if the body is not well-formed XML.
    pub fn parse(xml: impl Into<String>) -> Result<Self, XmlError> {
        let raw = xml.into();
        let root = parse(&raw)?;
        Ok(Self { raw, root })
    }

    /// The document element.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The document element, if `name` is its tag name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        (self.root.tag_name() == name).then_some(&self.root)
    }

    /// Shortcut for [`Node::get`] on the document element.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::IndexOutOfBounds`] for a position past the last child.
    pub fn lookup<'k>(&self, key: impl Into<Key<'k>>) -> Result<Lookup<'_>, XmlError> {
        self.root.get(key)
    }

    /// The body text exactly as received.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Consume the document, keeping only the tree.
    #[must_use]
    pub fn into_root(self) -> Node {
        self.root
    }
}
