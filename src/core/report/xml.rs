//! Owned, immutable XML element values
//!
//! Used to carry the captured export configuration from the partition
//! document it was parsed from into the aggregate document.

use crate::domain::Result;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Element name of the export directory inside an export configuration
pub const EXPORT_DIRECTORY: &str = "ExportDirectory";

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// One piece of element content, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An owned XML element: qualified name, attributes and ordered content
///
/// Names keep their namespace prefix and namespace declarations are carried
/// as `xmlns` attributes, so a copied subtree serializes on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    content: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Copy a parsed node and its subtree
    ///
    /// Text is kept verbatim, including mixed content. Whitespace-only text
    /// between child elements is formatting and is dropped. Comments and
    /// processing instructions are not copied.
    pub fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        Self::copy(node, None)
    }

    fn copy(node: roxmltree::Node<'_, '_>, parent: Option<roxmltree::Node<'_, '_>>) -> Self {
        let mut attributes: Vec<(String, String)> = node
            .namespaces()
            .filter(|ns| ns.uri() != XML_NAMESPACE)
            .filter(|ns| {
                parent.map_or(true, |p| {
                    !p.namespaces()
                        .any(|inherited| inherited.name() == ns.name() && inherited.uri() == ns.uri())
                })
            })
            .map(|ns| match ns.name() {
                Some(prefix) => (format!("xmlns:{prefix}"), ns.uri().to_string()),
                None => ("xmlns".to_string(), ns.uri().to_string()),
            })
            .collect();
        attributes.extend(
            node.attributes()
                .map(|a| (qualified(node, a.namespace(), a.name()), a.value().to_string())),
        );

        let has_elements = node.children().any(|n| n.is_element());
        let content = node
            .children()
            .filter_map(|child| {
                if child.is_element() {
                    Some(XmlNode::Element(Self::copy(child, Some(node))))
                } else if child.is_text() {
                    let text = child.text().unwrap_or_default();
                    (!(has_elements && text.trim().is_empty()))
                        .then(|| XmlNode::Text(text.to_string()))
                } else {
                    None
                }
            })
            .collect();

        let tag = node.tag_name();
        Self {
            name: qualified(node, tag.namespace(), tag.name()),
            attributes,
            content,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn content(&self) -> &[XmlNode] {
        &self.content
    }

    /// First text node of the element
    pub fn text(&self) -> Option<&str> {
        self.content.iter().find_map(|node| match node {
            XmlNode::Text(text) => Some(text.as_str()),
            XmlNode::Element(_) => None,
        })
    }

    /// All direct text of the element, concatenated
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Child elements in document order
    pub fn children(&self) -> impl Iterator<Item = &XmlElement> {
        self.content.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children().find(|c| c.name == name)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(XmlNode::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.content.push(XmlNode::Element(child));
        self
    }

    /// Copy with the content of the named child replaced by `text`, appending the child if absent
    pub fn with_child_text(&self, name: &str, text: &str) -> Self {
        let mut copy = self.clone();
        let existing = copy.content.iter_mut().find_map(|node| match node {
            XmlNode::Element(child) if child.name == name => Some(child),
            _ => None,
        });
        match existing {
            Some(child) => child.content = vec![XmlNode::Text(text.to_string())],
            None => copy
                .content
                .push(XmlNode::Element(XmlElement::new(name).with_text(text))),
        }
        copy
    }

    /// Copy without any child element of the given name
    pub fn without_child(&self, name: &str) -> Self {
        let mut copy = self.clone();
        copy.content
            .retain(|node| !matches!(node, XmlNode::Element(child) if child.name == name));
        copy
    }

    /// Copy with the export directory rewritten to `directory`
    pub fn with_export_directory(&self, directory: &str) -> Self {
        self.with_child_text(EXPORT_DIRECTORY, directory)
    }

    /// Whether two configurations agree on everything except the export directory
    pub fn same_configuration(&self, other: &XmlElement) -> bool {
        self.without_child(EXPORT_DIRECTORY) == other.without_child(EXPORT_DIRECTORY)
    }

    /// Serialize this element and its subtree
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.content.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for node in &self.content {
            match node {
                XmlNode::Element(child) => child.write_to(writer)?,
                XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

/// `prefix:local` when the namespace is bound to a prefix, else `local`
fn qualified(node: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    let prefix = namespace.and_then(|uri| {
        if uri == XML_NAMESPACE {
            Some("xml")
        } else {
            node.lookup_prefix(uri)
        }
    });
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}
