//! snfeed-xml: XML node tree and writer for snfeed
//!
//! This crate provides:
//! - A typed XML tree (elements, text, CDATA, comments)
//! - Serialization of that tree to indented or single-line XML text through
//!   `quick-xml` events
//!
//! ## Example
//!
//! ```rust
//! use snfeed_xml::{Declaration, Document, Element, Node, WriterOptions, xml_to_string};
//!
//! let doc = Document::new(
//!     Some(Declaration::default()),
//!     Element::new("rss")
//!         .with_attribute("version", "2.0")
//!         .with_children(vec![Node::cdata_element("title", "Hello")]),
//! );
//!
//! let xml = xml_to_string(&doc, &WriterOptions::default());
//! assert!(xml.contains("<title><![CDATA[Hello]]></title>"));
//! ```

pub mod tree;
pub mod writer;

pub use tree::{Attribute, CData, Comment, Declaration, Document, Element, Node, Text};
pub use writer::{WriterOptions, write_xml, xml_to_string};
