//! Read-only response tree nodes and their navigation.
//!
//! A [`Node`] is either an element or a run of text. Elements carry a tag name,
//! attributes in document order and their direct children (elements and text
//! nodes) in document order. Text nodes report `#text` as their tag name and
//! have no attributes or children.
//!
//! [`Node::get`] resolves a key with a fixed priority:
//!
//! 1. a numeric key (or a name made only of digits) is a child position
//! 2. a name matching an attribute returns the attribute value
//! 3. otherwise the first child element with that tag name, if any

use std::fmt;

use crate::error::XmlError;
use crate::value::{Value, coerce};

/// Tag name reported by text nodes.
pub const TEXT_NODE_NAME: &str = "#text";

/// What kind of DOM node a [`Node`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with a tag name, attributes and children.
    Element,
    /// Character data (text and CDATA merged).
    Text,
}

/// One node of a parsed response.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    text: Option<String>,
}

/// Key accepted by [`Node::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    /// Position among the direct children.
    Index(usize),
    /// Attribute or child tag name. Digit-only names are treated as positions.
    Name(&'a str),
}

impl From<usize> for Key<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name.as_str())
    }
}

/// Result of a [`Node::get`] lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// A child node, found by position or by tag name.
    Node(&'a Node),
    /// An attribute value.
    Attribute(&'a str),
    /// No attribute and no child element with the requested name.
    Missing,
}

impl<'a> Lookup<'a> {
    /// The node, if the lookup resolved to one.
    #[must_use]
    pub fn node(self) -> Option<&'a Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The attribute value, if the lookup resolved to one.
    #[must_use]
    pub fn attribute(self) -> Option<&'a str> {
        match self {
            Self::Attribute(value) => Some(value),
            _ => None,
        }
    }

    /// Whether nothing was found.
    #[must_use]
    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Coerced value: the attribute value itself, or the node's [`Node::value`].
    #[must_use]
    pub fn value(self) -> Option<Value<'a>> {
        match self {
            Self::Node(node) => node.value(),
            Self::Attribute(value) => Some(coerce(value)),
            Self::Missing => None,
        }
    }

    /// Continue navigating from a resolved node.
    ///
    /// Attributes and missing results have nothing below them, so they yield
    /// [`Lookup::Missing`].
    pub fn get<'k>(self, key: impl Into<Key<'k>>) -> Result<Lookup<'a>, XmlError> {
        match self {
            Self::Node(node) => node.get(key),
            Self::Attribute(_) | Self::Missing => Ok(Self::Missing),
        }
    }
}

impl Node {
    /// Create an element node.
    #[must_use]
    pub fn element(
        name: impl Into<String>,
        attributes: Vec<(String, String)>,
        children: Vec<Node>,
    ) -> Self {
        Self {
            kind: NodeKind::Element,
            name: name.into(),
            attributes,
            children,
            text: None,
        }
    }

    /// Create a text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            name: TEXT_NODE_NAME.to_owned(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: Some(content.into()),
        }
    }

    /// Element or text.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Whether this is a text node.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Tag name of an element, `#text` for text nodes.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.name
    }

    /// Attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Direct children (elements and text nodes) in document order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Raw text: the node's own text for text nodes, otherwise the text of its
    /// first text child.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        if self.is_text() {
            return self.text.as_deref();
        }
        self.children
            .iter()
            .find(|child| child.is_text())
            .and_then(|child| child.text.as_deref())
    }

    /// Whether the element carries the named attribute.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.find_attribute(name).is_some()
    }

    /// Value of the named attribute.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::AttributeNotFound`] if the attribute is absent.
    /// An attribute present with an empty value is returned as `""`.
    pub fn attribute(&self, name: &str) -> Result<&str, XmlError> {
        self.find_attribute(name)
            .ok_or_else(|| XmlError::AttributeNotFound {
                element: self.name.clone(),
                name: name.to_owned(),
            })
    }

    /// First direct child element with the given tag name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|child| !child.is_text() && child.name == name)
    }

    /// Direct child at `index`, counting text nodes.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::IndexOutOfBounds`] if `index` is past the last child.
    pub fn child_at(&self, index: usize) -> Result<&Node, XmlError> {
        self.children
            .get(index)
            .ok_or(XmlError::IndexOutOfBounds {
                index,
                len: self.children.len(),
            })
    }

    /// Resolve a key by position, then attribute, then child element.
    ///
    /// ```
    /// use level3_xml::{Lookup, parse};
    ///
    /// let root = parse(r#"<item name="x"><name>y</name></item>"#).unwrap();
    /// assert_eq!(root.get("name").unwrap(), Lookup::Attribute("x"));
    /// assert_eq!(root.get(0_usize).unwrap().node().unwrap().tag_name(), "name");
    /// assert!(root.get("missing").unwrap().is_missing());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::IndexOutOfBounds`] for a position past the last child.
    pub fn get<'k>(&self, key: impl Into<Key<'k>>) -> Result<Lookup<'_>, XmlError> {
        match key.into() {
            Key::Index(index) => self.child_at(index).map(Lookup::Node),
            Key::Name(name) => {
                if let Some(index) = parse_index(name) {
                    return self.child_at(index).map(Lookup::Node);
                }
                if let Some(value) = self.find_attribute(name) {
                    return Ok(Lookup::Attribute(value));
                }
                Ok(self.child(name).map_or(Lookup::Missing, Lookup::Node))
            }
        }
    }

    /// Coerced text of this node, or of its first text child.
    ///
    /// Computed on every call; returns `None` if there is no text.
    #[must_use]
    pub fn value(&self) -> Option<Value<'_>> {
        self.text_content().map(coerce)
    }

    /// Attribute names. The order carries no meaning.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(name, _)| name.as_str())
    }

    /// Tag names of the direct child elements, in document order, duplicates kept.
    #[must_use]
    pub fn child_tag_names(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter(|child| !child.is_text())
            .map(Node::tag_name)
            .collect()
    }

    fn find_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A name made only of ASCII digits addresses a child position.
///
/// Digit strings too large for `usize` map to `usize::MAX`, which is always
/// out of range.
fn parse_index(name: &str) -> Option<usize> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(name.parse::<usize>().unwrap_or(usize::MAX))
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_text() {
            return f.write_str(self.text.as_deref().unwrap_or_default());
        }
        match self.value() {
            Some(value) => write!(f, "<{0}>{value}</{0}>", self.name),
            None => write!(f, "<{0}>None</{0}>", self.name),
        }
    }
}
