//! Change groups scanned from rendered diff rows
//!
//! Groups are discovered after rendering, from the row markup itself, so the
//! same scan works for engine output and for comparison markup that arrives
//! already rendered.

use super::cursor::NavigationCursor;
use crate::diff::renderer::{ADDED_CLASS, REMOVED_CLASS, ROW_CLASS};
use crate::diff::{DiffOperation, DiffResult};
use crate::dom::{Document, NodeId};
use tracing::debug;

/// Class applied to the rows and cells of the focused group
pub const FOCUS_CLASS: &str = "diff-focus";

/// Classification of one rendered diff row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedRow {
    /// Value of the row's `data-row` attribute
    pub index: usize,
    pub node: Option<NodeId>,
    pub old_changed: bool,
    pub new_changed: bool,
}

impl RenderedRow {
    pub fn is_changed(&self) -> bool {
        self.old_changed || self.new_changed
    }
}

/// A maximal run of consecutive changed rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeGroup {
    pub id: String,
    /// Row index of the first row in the run
    pub row_index: usize,
    pub row_count: usize,
}

/// Where the view should scroll after a focus change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTarget {
    pub group_id: String,
    pub row_index: usize,
    pub row_count: usize,
    /// `data-row` value of the anchor row
    pub anchor: String,
}

/// Read row classifications from rendered markup, in document order
pub fn rows_from_document(doc: &Document) -> Vec<RenderedRow> {
    doc.elements_by_class(ROW_CLASS)
        .into_iter()
        .enumerate()
        .map(|(position, node)| {
            let cells = doc.descendants(node);
            RenderedRow {
                index: doc
                    .attr(node, "data-row")
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(position),
                node: Some(node),
                old_changed: cells.iter().any(|cell| doc.has_class(*cell, REMOVED_CLASS)),
                new_changed: cells.iter().any(|cell| doc.has_class(*cell, ADDED_CLASS)),
            }
        })
        .collect()
}

/// Row classifications straight from a diff, without markup
pub fn rows_from_diff(diff: &DiffResult) -> Vec<RenderedRow> {
    diff.rows
        .iter()
        .enumerate()
        .map(|(index, row)| RenderedRow {
            index,
            node: None,
            old_changed: matches!(row.operation, DiffOperation::Removed | DiffOperation::Changed),
            new_changed: matches!(row.operation, DiffOperation::Added | DiffOperation::Changed),
        })
        .collect()
}

/// Collapse consecutive changed rows into groups
pub fn scan(rows: &[RenderedRow]) -> Vec<ChangeGroup> {
    spans(rows)
        .into_iter()
        .enumerate()
        .map(|(n, (start, len))| ChangeGroup {
            id: format!("change-group-{n}"),
            row_index: rows[start].index,
            row_count: len,
        })
        .collect()
}

/// `(position, length)` of each changed run
fn spans(rows: &[RenderedRow]) -> Vec<(usize, usize)> {
    let mut out: Vec<(usize, usize)> = Vec::new();
    let mut previous_changed = false;
    for (position, row) in rows.iter().enumerate() {
        if row.is_changed() {
            match out.last_mut() {
                Some((_, len)) if previous_changed => *len += 1,
                _ => out.push((position, 1)),
            }
        }
        previous_changed = row.is_changed();
    }
    out
}

/// Change groups of one rendered tab plus its navigation cursor
#[derive(Debug, Clone, Default)]
pub struct ChangeGroupIndex {
    groups: Vec<ChangeGroup>,
    rows: Vec<RenderedRow>,
    spans: Vec<(usize, usize)>,
    cursor: NavigationCursor,
}

impl ChangeGroupIndex {
    /// Scan a live container holding the rendered markup of `diff`
    pub fn attach(diff: &DiffResult, doc: &Document) -> Self {
        if diff.is_degenerate {
            debug!(tab = %diff.tab_name, "degenerate diff, no change groups");
            return Self::default();
        }
        Self::from_document(doc)
    }

    /// Scan rendered markup whose diff is not at hand
    pub fn from_document(doc: &Document) -> Self {
        let degenerate = doc
            .descendants(doc.root())
            .into_iter()
            .any(|id| doc.attr(id, "data-degenerate") == Some("true"));
        if degenerate {
            return Self::default();
        }

        let rows = rows_from_document(doc);
        let spans = spans(&rows);
        let groups = scan(&rows);
        debug!(rows = rows.len(), groups = groups.len(), "scanned change groups");

        Self {
            cursor: NavigationCursor::new(groups.len()),
            groups,
            rows,
            spans,
        }
    }

    pub fn groups(&self) -> &[ChangeGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    pub fn next(&mut self, doc: &mut Document) -> Option<FocusTarget> {
        let index = self.cursor.next()?;
        self.emphasize(doc, index)
    }

    pub fn prev(&mut self, doc: &mut Document) -> Option<FocusTarget> {
        let index = self.cursor.prev()?;
        self.emphasize(doc, index)
    }

    /// Re-apply emphasis for the current group, if any
    pub fn focus(&mut self, doc: &mut Document) -> Option<FocusTarget> {
        let index = self.cursor.index()?;
        self.emphasize(doc, index)
    }

    pub fn reset(&mut self, doc: &mut Document) {
        self.cursor.reset();
        clear_focus(doc);
    }

    pub fn position_label(&self) -> String {
        self.cursor.label()
    }

    fn emphasize(&self, doc: &mut Document, index: usize) -> Option<FocusTarget> {
        let group = self.groups.get(index)?;
        let (start, len) = self.spans[index];

        clear_focus(doc);
        for row in &self.rows[start..start + len] {
            let Some(node) = row.node else { continue };
            doc.add_class(node, FOCUS_CLASS);
            for cell in doc.children(node).to_vec() {
                if doc.tag_name(cell) == Some("td") {
                    doc.add_class(cell, FOCUS_CLASS);
                }
            }
        }

        Some(FocusTarget {
            group_id: group.id.clone(),
            row_index: group.row_index,
            row_count: group.row_count,
            anchor: group.row_index.to_string(),
        })
    }
}

fn clear_focus(doc: &mut Document) {
    for id in doc.elements_by_class(FOCUS_CLASS) {
        doc.remove_class(id, FOCUS_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffEngine, DiffMode};

    fn row(index: usize, old_changed: bool, new_changed: bool) -> RenderedRow {
        RenderedRow {
            index,
            node: None,
            old_changed,
            new_changed,
        }
    }

    #[test]
    fn test_scan_merges_consecutive_rows() {
        let rows = vec![
            row(0, false, false),
            row(1, true, false),
            row(2, false, true),
            row(3, false, false),
            row(4, true, true),
        ];
        let groups = scan(&rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].row_index, 1);
        assert_eq!(groups[0].row_count, 2);
        assert_eq!(groups[1].row_index, 4);
        assert_eq!(groups[1].id, "change-group-1");
    }

    #[test]
    fn test_scan_unchanged_only() {
        let rows = vec![row(0, false, false), row(1, false, false)];
        assert!(scan(&rows).is_empty());
        assert!(scan(&[]).is_empty());
    }

    #[test]
    fn test_degenerate_diff_has_no_groups() {
        let diff = DiffEngine::new().diff_texts("T", "x", "x", DiffMode::Exhaustive);
        let doc = Document::parse(&diff.rendered_markup);

        assert!(ChangeGroupIndex::attach(&diff, &doc).is_empty());
        assert!(ChangeGroupIndex::from_document(&doc).is_empty());
    }

    #[test]
    fn test_document_scan_matches_diff_scan() {
        let diff = DiffEngine::new().diff_texts(
            "T",
            "a\nb\nc\nd\ne",
            "a\nB\nc\nd\nE",
            DiffMode::Exhaustive,
        );
        let doc = Document::parse(&diff.rendered_markup);

        let from_markup = scan(&rows_from_document(&doc));
        let from_rows = scan(&rows_from_diff(&diff));
        assert_eq!(from_markup, from_rows);
        assert_eq!(from_markup.len(), 2);
    }

    #[test]
    fn test_focus_moves_emphasis() {
        let diff = DiffEngine::new().diff_texts(
            "T",
            "a\nb\nc\nd\ne",
            "a\nB\nc\nd\nE",
            DiffMode::Exhaustive,
        );
        let mut doc = Document::parse(&diff.rendered_markup);
        let mut index = ChangeGroupIndex::attach(&diff, &doc);

        let first = index.next(&mut doc).expect("first group");
        assert_eq!(first.group_id, "change-group-0");
        assert_eq!(first.anchor, first.row_index.to_string());
        let focused_rows = |doc: &Document| -> Vec<String> {
            doc.elements_by_class(FOCUS_CLASS)
                .into_iter()
                .filter(|id| doc.tag_name(*id) == Some("tr"))
                .map(|id| doc.text_content(id))
                .collect()
        };
        let rows = focused_rows(&doc);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|text| text.contains('b') || text.contains('B')));

        let second = index.next(&mut doc).expect("second group");
        assert_eq!(second.group_id, "change-group-1");
        let rows = focused_rows(&doc);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|text| text.contains('e') || text.contains('E')));

        assert_eq!(index.next(&mut doc).map(|t| t.group_id), Some(first.group_id));
        assert_eq!(index.position_label(), "1 / 2");

        index.reset(&mut doc);
        assert!(doc.elements_by_class(FOCUS_CLASS).is_empty());
        assert_eq!(index.position_label(), "0 / 2");
    }

    #[test]
    fn test_navigation_on_empty_index_is_noop() {
        let mut doc = Document::new();
        let mut index = ChangeGroupIndex::default();
        assert_eq!(index.next(&mut doc), None);
        assert_eq!(index.prev(&mut doc), None);
        assert_eq!(index.focus(&mut doc), None);
    }
}
