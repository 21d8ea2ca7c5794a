use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ProfilerError;

/// Index of a node inside a [`PageDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// Raw node tree as serialized by the page-side instrumentation script.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawNode {
    // listed first: element objects may carry a `text` key too
    Element {
        tag: String,
        #[serde(default)]
        attributes: Vec<(String, String)>,
        #[serde(rename = "computedStyle", default)]
        computed_style: BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<RawNode>,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone)]
pub struct ElementData {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub computed_style: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// Read-only value copy of a page's DOM. Node 0 is always the document node;
/// elements created with [`PageDocument::create_element`] stay detached until
/// appended somewhere under it.
#[derive(Debug, Clone)]
pub struct PageDocument {
    nodes: Vec<Node>,
}

impl Default for PageDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PageDocument {
    pub fn new() -> Self {
        PageDocument {
            nodes: vec![Node {
                parent: None,
                children: vec![],
                data: NodeData::Document,
            }],
        }
    }

    /// Build a document whose single root element is `root`.
    pub fn from_raw(root: &RawNode) -> Self {
        let mut doc = PageDocument::new();
        let document = doc.document();
        doc.insert_raw(document, root);
        doc
    }

    pub fn from_json(json: &str) -> Result<Self, ProfilerError> {
        let raw: RawNode = serde_json::from_str(json).map_err(|source| ProfilerError::Json {
            context: "page document".into(),
            source,
        })?;
        Ok(PageDocument::from_raw(&raw))
    }

    fn insert_raw(&mut self, parent: NodeId, raw: &RawNode) {
        match raw {
            RawNode::Text { text } => {
                self.append_text(parent, text);
            }
            RawNode::Element {
                tag,
                attributes,
                computed_style,
                children,
            } => {
                let id = self.create_element(tag);
                for (name, value) in attributes {
                    self.set_attribute(id, name, value);
                }
                for (property, value) in computed_style {
                    self.set_style(id, property, value);
                }
                self.append_child(parent, id);
                for child in children {
                    self.insert_raw(id, child);
                }
            }
        }
    }

    pub fn document(&self) -> NodeId {
        NodeId(0)
    }

    /// The first element child of the document node (usually `<html>`).
    pub fn document_element(&self) -> Option<ElementRef<'_>> {
        self.node(self.document())?
            .child_elements()
            .next()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            attributes: vec![],
            computed_style: BTreeMap::new(),
        }))
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() || parent == child {
            return;
        }
        // refuse to create a cycle
        let mut cursor = self.nodes[parent.0].parent;
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return;
            }
            cursor = self.nodes[ancestor.0].parent;
        }
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.push(NodeData::Text(text.to_string()));
        self.append_child(parent, id);
        id
    }

    /// Set (or replace) an attribute, keeping first-insertion order.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_data_mut(id) {
            let name = name.to_ascii_lowercase();
            match el.attributes.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => el.attributes.push((name, value.to_string())),
            }
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(el) = self.element_data_mut(id) {
            el.attributes.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        }
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        if let Some(el) = self.element_data_mut(id) {
            el.computed_style
                .insert(property.to_string(), value.to_string());
        }
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.nodes.get(id.0).map(|_| NodeRef { doc: self, id })
    }

    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.node(id)?.as_element()
    }

    /// All elements reachable from the document node, in document order.
    pub fn elements(&self) -> Vec<ElementRef<'_>> {
        let mut out = Vec::new();
        let mut stack = vec![self.document()];
        while let Some(id) = stack.pop() {
            if let Some(el) = self.element(id) {
                out.push(el);
            }
            for child in self.nodes[id.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node {
            parent: None,
            children: vec![],
            data,
        });
        NodeId(self.nodes.len() - 1)
    }

    fn element_data_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.data) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }
}

/// Handle to any node (document, element or text).
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a PageDocument,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn data(&self) -> &'a NodeData {
        &self.doc.nodes[self.id.0].data
    }

    pub fn as_element(&self) -> Option<ElementRef<'a>> {
        match self.data() {
            NodeData::Element(data) => Some(ElementRef {
                doc: self.doc,
                id: self.id,
                data,
            }),
            _ => None,
        }
    }

    pub fn child_elements(self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let doc = self.doc;
        doc.nodes[self.id.0]
            .children
            .iter()
            .filter_map(move |c| doc.element(*c))
    }
}

/// Handle to an element node.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a PageDocument,
    id: NodeId,
    data: &'a ElementData,
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl<'a> ElementRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a PageDocument {
        self.doc
    }

    pub fn tag_name(&self) -> &'a str {
        &self.data.tag
    }

    pub fn attributes(self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.data
            .attributes
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.data
            .attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn class_list(&self) -> Vec<&'a str> {
        self.attribute("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn computed_style(&self, property: &str) -> Option<&'a str> {
        self.data.computed_style.get(property).map(String::as_str)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.doc.nodes[self.id.0]
            .parent
            .and_then(|p| self.doc.node(p))
    }

    pub fn parent_element(&self) -> Option<ElementRef<'a>> {
        self.parent()?.as_element()
    }

    /// True when the element can be reached from the document node.
    pub fn is_connected(&self) -> bool {
        let mut current = self.id;
        while let Some(parent) = self.doc.nodes[current.0].parent {
            current = parent;
        }
        current == self.doc.document()
    }

    /// Concatenation of the element's own text node children.
    pub fn direct_text(&self) -> String {
        self.doc.nodes[self.id.0]
            .children
            .iter()
            .filter_map(|c| match &self.doc.nodes[c.0].data {
                NodeData::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// 1-based position among siblings with the same tag, and the number of
    /// such siblings. Detached roots report `(1, 1)`.
    pub fn type_position(&self) -> (usize, usize) {
        let Some(parent) = self.parent() else {
            return (1, 1);
        };
        let mut index = 0;
        let mut total = 0;
        for sibling in parent.child_elements() {
            if sibling.tag_name() != self.tag_name() {
                continue;
            }
            total += 1;
            if sibling.id == self.id {
                index = total;
            }
        }
        (index, total)
    }

    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        write_markup(self.doc, self.id, &mut out);
        out
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn write_markup(doc: &PageDocument, id: NodeId, out: &mut String) {
    let node = &doc.nodes[id.0];
    match &node.data {
        NodeData::Text(text) => out.push_str(&escape(text, false)),
        NodeData::Document => {
            for child in &node.children {
                write_markup(doc, *child, out);
            }
        }
        NodeData::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for (name, value) in &el.attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape(value, true));
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                return;
            }
            for child in &node.children {
                write_markup(doc, *child, out);
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut s = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' if attribute => s.push_str("&quot;"),
            _ => s.push(c),
        }
    }
    s
}
