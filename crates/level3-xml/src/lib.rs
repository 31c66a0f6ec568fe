//! Schema-less XML response tree for the Level 3 CDN API.
//!
//! The API returns XML whose shape is not fixed from the client's point of
//! view, so instead of mapping it onto typed structs this crate parses it into
//! a read-only tree of [`Node`]s addressed by name or position, with scalar
//! coercion applied when a value is read.
//!
//! # Key components
//!
//! - [`parse`] / [`XmlDocument::parse`] to build the tree from response text
//! - [`Node::get`] for index, attribute, then child lookup in that fixed order
//! - [`Node::value`] and [`coerce`] for integer / float / string projection
//! - [`Node::render`] to serialize a subtree back to XML
//!
//! # Example
//!
//! ```
//! use level3_xml::{Value, XmlDocument};
//!
//! let doc = XmlDocument::parse(
//!     r#"<accessGroup name="g1"><missPerSecond>50.67</missPerSecond><metros><metro name="Atlanta, GA"/></metros></accessGroup>"#,
//! )
//! .unwrap();
//!
//! let group = doc.get("accessGroup").unwrap();
//! assert_eq!(group.get("missPerSecond").unwrap().value(), Some(Value::Float(50.67)));
//! assert_eq!(
//!     group.get("metros").unwrap().get(0_usize).unwrap().get("name").unwrap().attribute(),
//!     Some("Atlanta, GA")
//! );
//! ```

pub mod document;
pub mod error;
pub mod node;
pub mod parse;
pub mod render;
pub mod value;

pub use document::XmlDocument;
pub use error::XmlError;
pub use node::{Key, Lookup, Node, NodeKind};
pub use parse::parse;
pub use value::{Value, coerce};
