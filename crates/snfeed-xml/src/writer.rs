//! XML tree to text writer
//!
//! Converts a [`Document`] into XML text by replaying it as
//! [`quick_xml`] events.

use std::io;

use crate::tree::{Document, Element, Node};
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Options for the XML writer
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Spaces per nesting level; 0 writes the whole document on one line
    pub indent: usize,
    /// Drop comment nodes instead of writing them
    pub ignore_comments: bool,
    /// Write empty elements as `<x></x>` instead of `<x/>`
    pub full_tag_empty_element: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            ignore_comments: true,
            full_tag_empty_element: false,
        }
    }
}

/// Convert an XML document tree to a string
pub fn xml_to_string(doc: &Document, options: &WriterOptions) -> String {
    let mut buf = Vec::new();
    // Writes into a Vec<u8> cannot fail
    write_xml(doc, options, &mut buf).ok();
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write an XML document tree to any byte sink
///
/// Elements whose children are all text or CDATA stay on one line; other
/// children each start a new, indented line. No trailing newline is written.
pub fn write_xml<W: io::Write>(doc: &Document, options: &WriterOptions, out: W) -> io::Result<()> {
    let writer = if options.indent == 0 {
        Writer::new(out)
    } else {
        Writer::new_with_indent(out, b' ', options.indent)
    };
    XmlWriter { options, writer }.write_document(doc)
}

/// XML writer state
struct XmlWriter<'a, W: io::Write> {
    options: &'a WriterOptions,
    writer: Writer<W>,
}

impl<W: io::Write> XmlWriter<'_, W> {
    fn write_document(&mut self, doc: &Document) -> io::Result<()> {
        if let Some(decl) = &doc.declaration {
            self.writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                None,
            )))?;
        }
        self.write_element(&doc.root)
    }

    fn write_element(&mut self, el: &Element) -> io::Result<()> {
        let start = BytesStart::new(el.name.as_str()).with_attributes(
            el.attributes
                .iter()
                .map(|a| (a.name.as_str(), a.value.as_str())),
        );

        let children: Vec<&Node> = el
            .children
            .iter()
            .filter(|c| !(self.options.ignore_comments && matches!(c, Node::Comment(_))))
            .collect();

        if children.is_empty() && !self.options.full_tag_empty_element {
            return self.writer.write_event(Event::Empty(start));
        }

        self.writer.write_event(Event::Start(start))?;
        if children.is_empty() {
            // Keeps the end tag on the same line
            self.writer.write_event(Event::Text(BytesText::new("")))?;
        }
        for child in children {
            self.write_node(child)?;
        }
        self.writer
            .write_event(Event::End(BytesEnd::new(el.name.as_str())))
    }

    fn write_node(&mut self, node: &Node) -> io::Result<()> {
        match node {
            Node::Element(e) => self.write_element(e),
            Node::Text(t) => self.writer.write_event(Event::Text(BytesText::from_escaped(
                partial_escape(t.value.as_str()),
            ))),
            Node::CData(c) => {
                for part in BytesCData::escaped(&c.value) {
                    self.writer.write_event(Event::CData(part))?;
                }
                Ok(())
            }
            Node::Comment(c) => self.writer.write_event(Event::Comment(BytesText::from_escaped(
                comment_body(&c.value),
            ))),
        }
    }
}

/// Separate adjacent hyphens and pad a trailing one so the body never
/// contains `--` or runs into the closing `-->`
fn comment_body(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '-' && out.ends_with('-') {
            out.push(' ');
        }
        out.push(ch);
    }
    if out.ends_with('-') {
        out.push(' ');
    }
    out
}
