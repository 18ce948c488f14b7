use super::{Document, NodeData, NodeId, RAW_TEXT_ELEMENTS};
use crate::utils::html::{escape_attribute, escape_text};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

enum Step {
    Open(NodeId),
    Close(NodeId),
}

pub(super) fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    let mut steps = vec![Step::Open(id)];
    while let Some(step) = steps.pop() {
        let id = match step {
            Step::Open(id) => id,
            Step::Close(id) => {
                if let Some(name) = doc.tag_name(id) {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
                continue;
            }
        };

        match doc.data(id) {
            NodeData::Root => {
                steps.extend(doc.children(id).iter().rev().map(|child| Step::Open(*child)));
            }
            NodeData::Text(text) => {
                let raw = doc
                    .parent(id)
                    .and_then(|parent| doc.tag_name(parent))
                    .is_some_and(|name| RAW_TEXT_ELEMENTS.contains(&name));
                if raw {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            }
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::Element(element) => {
                out.push('<');
                out.push_str(&element.name);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.name.as_str()) {
                    continue;
                }
                steps.push(Step::Close(id));
                steps.extend(doc.children(id).iter().rev().map(|child| Step::Open(*child)));
            }
        }
    }
}
