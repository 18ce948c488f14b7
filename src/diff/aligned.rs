//! Row pairing for comparison markup rendered by the backend

use super::renderer::{NEW_CELL_CLASS, OLD_CELL_CLASS};
use crate::dom::Document;
use serde::Serialize;

/// One row of a backend-rendered comparison: old cell next to new cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedRow {
    pub left: String,
    pub right: String,
}

/// Pair the i-th old cell with the i-th new cell
///
/// The shorter side is padded with empty strings.
pub fn align_comparison(html: &str) -> Vec<AlignedRow> {
    let doc = Document::parse(html);
    let left = doc.elements_by_class(OLD_CELL_CLASS);
    let right = doc.elements_by_class(NEW_CELL_CLASS);

    (0..left.len().max(right.len()))
        .map(|i| AlignedRow {
            left: left.get(i).map(|id| doc.outer_html(*id)).unwrap_or_default(),
            right: right.get(i).map(|id| doc.outer_html(*id)).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_cells_in_order() {
        let html = r#"<div class="diff-left">a</div><div class="diff-right">A</div><div class="diff-left">b</div><div class="diff-right">B</div>"#;
        let rows = align_comparison(html);

        assert_eq!(rows.len(), 2);
        assert!(rows[0].left.contains(">a<"));
        assert!(rows[0].right.contains(">A<"));
        assert!(rows[1].left.contains(">b<"));
        assert!(rows[1].right.contains(">B<"));
    }

    #[test]
    fn test_shorter_side_is_padded() {
        let html = r#"<div class="diff-left">a</div><div class="diff-left">b</div><div class="diff-right">A</div>"#;
        let rows = align_comparison(html);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].right, "");
        assert!(rows[1].left.contains(">b<"));
    }

    #[test]
    fn test_no_cells() {
        assert!(align_comparison("<p>nothing</p>").is_empty());
    }
}
