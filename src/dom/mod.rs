//! Arena-backed markup tree
//!
//! Externally sourced HTML is parsed with `scraper` and copied into a small
//! mutable arena so that highlighting, diff-row emphasis and activation can
//! walk text nodes in document order, replace them with marked-up fragments
//! and flip attributes in place. Nodes are addressed by [`NodeId`]; detached
//! nodes stay in the arena but are no longer reachable from the root.

mod parse;
mod serialize;

/// Elements html5ever parses as raw text; their text is serialized unescaped
///
/// `noscript` is raw text because parsing runs with scripting enabled.
pub const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "noscript", "plaintext",
];

/// Whether text under this element is excluded from visible content
///
/// Every raw-text element, plus `template` (inert) and `textarea` (form
/// value, not page text).
pub fn hides_text(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name) || matches!(name, "template" | "textarea")
}

/// Handle to a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Payload of a single node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// The synthetic container every parsed fragment hangs from
    Root,
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Tag name and attributes of an element node
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Lower-case tag name
    pub name: String,
    /// Attributes in insertion order
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value
    pub fn set_attr<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Remove an attribute, returning its previous value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let position = self.attrs.iter().position(|(key, _)| key == name)?;
        Some(self.attrs.remove(position).1)
    }

    /// Iterate over the whitespace-separated class list
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut classes: Vec<&str> = self.classes().collect();
        classes.push(class);
        let joined = classes.join(" ");
        self.set_attr("class", joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let remaining = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if remaining.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", remaining);
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Mutable markup tree
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create an empty document containing only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Parse markup with container `innerHTML` semantics
    pub fn parse(html: &str) -> Self {
        parse::parse_fragment(html)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id.0].data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Text of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Tag name if the node is an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.name.as_str())
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: &str, attrs: Vec<(String, String)>) -> NodeId {
        self.push(NodeData::Element(ElementData {
            name: name.to_ascii_lowercase(),
            attrs,
        }))
    }

    /// Create a detached text node
    pub fn create_text<S: Into<String>>(&mut self, text: S) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    /// Create a detached comment node
    pub fn create_comment<S: Into<String>>(&mut self, text: S) -> NodeId {
        self.push(NodeData::Comment(text.into()))
    }

    /// Remove a node from its parent; the subtree stays in the arena
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Replace an attached node with a sequence of nodes at the same position
    pub fn replace_with(&mut self, id: NodeId, replacements: &[NodeId]) {
        let Some(parent) = self.nodes[id.0].parent else {
            return;
        };
        for replacement in replacements {
            self.detach(*replacement);
        }
        let Some(position) = self.nodes[parent.0].children.iter().position(|c| *c == id) else {
            return;
        };
        self.nodes[id.0].parent = None;
        let siblings = &mut self.nodes[parent.0].children;
        siblings.splice(position..=position, replacements.iter().copied());
        for replacement in replacements {
            self.nodes[replacement.0].parent = Some(parent);
        }
    }

    /// Whether the node is reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root() {
                return true;
            }
            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// All descendants of `id` in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Visible text nodes in document order
    ///
    /// Subtrees of elements for which [`hides_text`] holds are skipped.
    pub fn text_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(self.root()).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            match &self.nodes[next.0].data {
                NodeData::Text(_) => out.push(next),
                NodeData::Element(element) if hides_text(&element.name) => {}
                _ => stack.extend(self.children(next).iter().rev().copied()),
            }
        }
        out
    }

    /// Attached elements with the given tag name, in document order
    pub fn elements_by_tag(&self, name: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.tag_name(*id) == Some(name))
            .collect()
    }

    /// Attached elements carrying the given class, in document order
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element.set_attr(name, value);
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id).and_then(|element| element.remove_attr(name))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|element| element.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(element) = self.element_mut(id) {
            element.add_class(class);
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(element) = self.element_mut(id) {
            element.remove_class(class);
        }
    }

    /// Concatenated text of every text descendant (DOM `textContent`)
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|node| self.text(node))
            .collect()
    }

    /// Serialize the children of a node
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            serialize::write_node(self, *child, &mut out);
        }
        out
    }

    /// Serialize a node including its own tag
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        serialize::write_node(self, id, &mut out);
        out
    }

    /// Serialize the whole document
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize_fragment() {
        let doc = Document::parse("<div class=\"a\"><p>Annual fee &amp; charges</p><br></div>");

        assert_eq!(doc.elements_by_tag("p").len(), 1);
        assert_eq!(
            doc.to_html(),
            "<div class=\"a\"><p>Annual fee &amp; charges</p><br></div>"
        );
    }

    #[test]
    fn test_document_wrappers_are_dropped() {
        let doc = Document::parse(
            "<!DOCTYPE html><html><head><style>p{}</style></head><body><p>x</p></body></html>",
        );

        assert!(doc.elements_by_tag("html").is_empty());
        assert!(doc.elements_by_tag("body").is_empty());
        assert_eq!(doc.elements_by_tag("style").len(), 1);
        assert_eq!(doc.elements_by_tag("p").len(), 1);
    }

    #[test]
    fn test_text_nodes_skip_raw_text_containers() {
        let doc = Document::parse("<p>one</p><script>var two = 2;</script><style>.x{}</style><p>three</p>");
        let texts: Vec<&str> = doc
            .text_nodes()
            .into_iter()
            .filter_map(|id| doc.text(id))
            .collect();

        assert_eq!(texts, vec!["one", "three"]);
    }

    #[test]
    fn test_replace_with_keeps_position() {
        let mut doc = Document::parse("<p>a<b>b</b>c</p>");
        let first_text = doc.text_nodes()[0];
        let span = doc.create_element("span", vec![]);
        let inner = doc.create_text("A");
        doc.append_child(span, inner);
        let tail = doc.create_text("!");

        doc.replace_with(first_text, &[span, tail]);

        assert_eq!(doc.to_html(), "<p><span>A</span>!<b>b</b>c</p>");
        assert!(!doc.is_attached(first_text));
    }

    #[test]
    fn test_class_helpers() {
        let mut doc = Document::parse("<div class=\"diff-row\"></div>");
        let row = doc.elements_by_class("diff-row")[0];

        doc.add_class(row, "diff-focus");
        doc.add_class(row, "diff-focus");
        assert_eq!(doc.attr(row, "class"), Some("diff-row diff-focus"));

        doc.remove_class(row, "diff-row");
        doc.remove_class(row, "diff-focus");
        assert_eq!(doc.attr(row, "class"), None);
    }

    #[test]
    fn test_deeply_nested_markup_round_trips() {
        let depth = 20_000;
        let html = format!("{}fee{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let doc = Document::parse(&html);

        assert_eq!(doc.elements_by_tag("div").len(), depth);
        assert_eq!(doc.text_nodes().len(), 1);
        assert_eq!(doc.to_html(), html);
    }

    #[test]
    fn test_hidden_text_follows_raw_text_elements() {
        for name in RAW_TEXT_ELEMENTS.iter().chain(["template", "textarea"].iter()) {
            assert!(hides_text(name), "{name}");
        }
        assert!(!hides_text("p"));

        let doc = Document::parse("<noscript>fee</noscript><p>fee</p>");
        assert_eq!(doc.text_nodes().len(), 1);
        assert_eq!(doc.to_html(), "<noscript>fee</noscript><p>fee</p>");
    }

    #[test]
    fn test_raw_text_is_not_escaped() {
        let doc = Document::parse("<script>if (a < b && c) {}</script>");
        assert_eq!(doc.to_html(), "<script>if (a < b && c) {}</script>");
    }
}
