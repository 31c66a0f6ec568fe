//! Error types for parsing and navigating response trees.

use std::io;

/// Errors that can occur while parsing, navigating or rendering a response tree.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An error from quick-xml attribute handling.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Text, a name or an entity reference could not be decoded.
    #[error("malformed XML: {0}")]
    Malformed(String),

    /// The document has no root element.
    #[error("document has no root element")]
    MissingRoot,

    /// The element has no attribute with the requested name.
    #[error("element <{element}> has no attribute {name:?}")]
    AttributeNotFound {
        /// Tag name of the element that was queried.
        element: String,
        /// The missing attribute name.
        name: String,
    },

    /// A positional child lookup was out of range.
    #[error("child index {index} out of range for {len} children")]
    IndexOutOfBounds {
        /// The requested position.
        index: usize,
        /// Number of direct children.
        len: usize,
    },
}
