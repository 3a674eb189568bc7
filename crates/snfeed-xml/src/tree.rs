//! XML document tree types
//!
//! A small, typed subset of the XML infoset: enough to describe a feed
//! document before it is written out as text.

use serde::{Deserialize, Serialize};

/// A complete XML document: optional declaration plus exactly one root element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub declaration: Option<Declaration>,
    pub root: Element,
}

/// The `<?xml ...?>` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
}

/// An XML node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Element(Element),
    Text(Text),
    CData(CData),
    Comment(Comment),
}

/// Element node with ordered attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

/// A single `name="value"` attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Character data, escaped on output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

/// `<![CDATA[...]]>` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CData {
    pub value: String,
}

/// `<!--...-->` comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub value: String,
}

// Convenience constructors
impl Node {
    pub fn element(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(Element::new(name).with_children(children))
    }

    /// Element holding a single text child: `<name>value</name>`
    pub fn text_element(name: impl Into<String>, value: impl Into<String>) -> Self {
        Node::element(name, vec![Node::text(value)])
    }

    /// Element holding a single CDATA child: `<name><![CDATA[value]]></name>`
    pub fn cdata_element(name: impl Into<String>, value: impl Into<String>) -> Self {
        Node::element(name, vec![Node::cdata(value)])
    }

    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(Text { value: s.into() })
    }

    pub fn cdata(s: impl Into<String>) -> Self {
        Node::CData(CData { value: s.into() })
    }

    pub fn comment(s: impl Into<String>) -> Self {
        Node::Comment(Comment { value: s.into() })
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Set an attribute, replacing the value in place if the name already exists
    ///
    /// Attribute order is insertion order; replacing keeps the original position.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Iterate over child elements, skipping text, CDATA and comments
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First child element with the given name
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.name == name)
    }

    /// All child elements with the given name, in document order
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.child_elements().filter(move |e| e.name == name)
    }

    /// Concatenated text and CDATA content of the direct children
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&t.value),
                Node::CData(c) => out.push_str(&c.value),
                _ => {}
            }
        }
        out
    }
}

impl Declaration {
    pub fn new(version: impl Into<String>, encoding: Option<String>) -> Self {
        Self {
            version: version.into(),
            encoding,
        }
    }
}

impl Default for Declaration {
    fn default() -> Self {
        Self::new("1.0", Some("utf-8".to_string()))
    }
}

impl Document {
    pub fn new(declaration: Option<Declaration>, root: Element) -> Self {
        Self { declaration, root }
    }
}
