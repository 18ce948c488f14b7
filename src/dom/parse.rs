use super::{Document, NodeId};
use scraper::{ElementRef, Html, Node};

/// Parse markup the way a container's `innerHTML` setter would
///
/// html5ever runs in fragment mode with a `<body>` context, so document
/// wrappers (`<html>`, `<head>`, `<body>`, doctype) are dropped while their
/// contents, including `<style>` and `<script>`, are kept in order.
pub(super) fn parse_fragment(html: &str) -> Document {
    let fragment = Html::parse_fragment(html);
    let mut doc = Document::new();
    let root = doc.root();

    // Explicit work list; external markup can nest deeper than the call stack allows
    let mut pending = vec![(root, fragment.root_element())];
    while let Some((parent, element)) = pending.pop() {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    let id = doc.create_text(&**text);
                    doc.append_child(parent, id);
                }
                Node::Comment(comment) => {
                    let id = doc.create_comment(&**comment);
                    doc.append_child(parent, id);
                }
                Node::Element(data) => {
                    let attrs = data
                        .attrs()
                        .map(|(name, value)| (name.to_string(), value.to_string()))
                        .collect();
                    let id = doc.create_element(data.name(), attrs);
                    doc.append_child(parent, id);
                    if let Some(child_element) = ElementRef::wrap(child) {
                        pending.push((id, child_element));
                    }
                }
                _ => {}
            }
        }
    }
    doc
}
