use std::collections::HashMap;

use quick_xml::{events::Event, Reader};

use crate::Status;

/// An owned XML element tree built from the upstream response body.
#[derive(Debug, Default, Clone)]
pub struct XmlNode {
    pub name: String,
    pub attrs: HashMap<String, String>,
    pub children: Vec<XmlNode>,

    text: String,
}

impl XmlNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// First descendant with a matching name, depth-first. The node itself
    /// is not a candidate.
    pub fn descendant(&self, name: &str) -> Option<&XmlNode> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants with a matching name, in document order.
    pub fn descendants(&self, name: &str) -> Vec<&XmlNode> {
        let mut nodes = Vec::new();
        self.collect_descendants(name, &mut nodes);
        nodes
    }

    fn collect_descendants<'a>(&'a self, name: &str, nodes: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.name == name {
                nodes.push(child);
            }
            child.collect_descendants(name, nodes);
        }
    }
}

/// Parses an XML document into an [`XmlNode`] tree. Any reader error,
/// unclosed element, or rootless document is reported as a parse failure.
pub fn parse(xml: &str) -> Result<XmlNode, Status> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if root.is_some() {
                    return Err(malformed("multiple root elements"));
                }
                stack.push(element(&start)?);
            }
            Ok(Event::Empty(start)) => {
                if root.is_some() {
                    return Err(malformed("multiple root elements"));
                }
                let node = element(&start)?;
                attach(&mut stack, &mut root, node);
            }
            Ok(Event::End(_)) => match stack.pop() {
                Some(node) => attach(&mut stack, &mut root, node),
                None => return Err(malformed("closing tag without a matching opening tag")),
            },
            Ok(Event::Text(text)) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text.unescape().map_err(malformed)?);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(node) = stack.last_mut() {
                    node.text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => (),
            Err(e) => return Err(malformed(e)),
        }
    }

    if !stack.is_empty() {
        return Err(malformed("unclosed element at end of document"));
    }
    root.ok_or_else(|| malformed("document has no root element"))
}

fn element(start: &quick_xml::events::BytesStart) -> Result<XmlNode, Status> {
    let mut node = XmlNode {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        ..Default::default()
    };
    for attr in start.attributes() {
        let attr = attr.map_err(malformed)?;
        node.attrs.insert(
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            attr.unescape_value().map_err(malformed)?.into_owned(),
        );
    }
    Ok(node)
}

fn attach(stack: &mut Vec<XmlNode>, root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

fn malformed(err: impl std::fmt::Display) -> Status {
    Status::unavailable(format!("malformed XML: {err}"))
}
