//! Visible-text extraction from markup payloads

use crate::dom::{hides_text, Document, NodeData, NodeId};

/// Elements that start on their own line when rendered
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table", "tbody", "thead",
    "tfoot", "tr", "ul",
];

/// Extract visible text with block boundaries rendered as line breaks
pub fn extract_text(html: &str) -> String {
    let doc = Document::parse(html);
    let mut out = String::new();
    write_text(&doc, doc.root(), &mut out);
    out
}

enum Step<'a> {
    Enter(NodeId),
    /// Closing work for an element whose children are written
    Leave(&'a str),
}

fn write_text(doc: &Document, id: NodeId, out: &mut String) {
    let mut steps: Vec<Step<'_>> = doc.children(id).iter().rev().map(|c| Step::Enter(*c)).collect();
    while let Some(step) = steps.pop() {
        let child = match step {
            Step::Enter(child) => child,
            Step::Leave(name) => {
                if BLOCK_ELEMENTS.contains(&name) && !out.ends_with('\n') {
                    out.push('\n');
                } else if matches!(name, "td" | "th") {
                    out.push(' ');
                }
                continue;
            }
        };
        match doc.data(child) {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element(element) => {
                let name = element.name.as_str();
                if hides_text(name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                if BLOCK_ELEMENTS.contains(&name) && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                steps.push(Step::Leave(name));
                steps.extend(doc.children(child).iter().rev().map(|c| Step::Enter(*c)));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_elements_become_lines() {
        let text = extract_text("<h2>Fees</h2><p>Annual fee: <b>500</b></p><ul><li>One</li><li>Two</li></ul>");
        assert_eq!(text, "Fees\nAnnual fee: 500\nOne\nTwo\n");
    }

    #[test]
    fn test_scripts_and_styles_are_ignored() {
        let text = extract_text("<style>p { color: red }</style><p>Visible</p><script>var x = 1;</script>");
        assert_eq!(text, "Visible\n");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(extract_text("a<br>b"), "a\nb");
    }

    #[test]
    fn test_table_cells_are_spaced() {
        assert_eq!(extract_text("<table><tr><td>Fee</td><td>500</td></tr></table>"), "Fee 500 \n");
    }

    #[test]
    fn test_deeply_nested_markup() {
        let depth = 20_000;
        let html = format!("{}Annual fee{}", "<div>".repeat(depth), "</div>".repeat(depth));
        assert_eq!(extract_text(&html), "Annual fee\n");
    }
}
