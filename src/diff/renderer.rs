//! HTML diff renderer for converting diff rows into side-by-side markup
//!
//! Every rendered row is a `tr.diff-row` carrying `data-row`; the old cell is
//! `td.diff-left` and the new cell `td.diff-right`. Cells showing a deletion
//! or insertion additionally carry `diff-removed` / `diff-added`, which is
//! what change-group scanning keys on.

use super::data::{DiffOperation, DiffRow};
use crate::utils::html::escape_html;

pub const ROW_CLASS: &str = "diff-row";
pub const OLD_CELL_CLASS: &str = "diff-left";
pub const NEW_CELL_CLASS: &str = "diff-right";
pub const REMOVED_CLASS: &str = "diff-removed";
pub const ADDED_CLASS: &str = "diff-added";

/// HTML renderer for side-by-side diffs
#[derive(Debug, Clone, Default)]
pub struct HtmlDiffRenderer;

impl HtmlDiffRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render diff rows as a two-column table
    pub fn render(&self, tab_name: &str, rows: &[DiffRow], is_degenerate: bool) -> String {
        let body = self.render_diff_rows(rows);

        format!(
            r#"<div class="diff-container" data-tab="{}" data-degenerate="{}">
    <table class="diff-table">
        <thead>
            <tr><th colspan="2">Previous version</th><th colspan="2">Current version</th></tr>
        </thead>
        <tbody>{}
        </tbody>
    </table>
</div>"#,
            escape_html(tab_name),
            is_degenerate,
            body
        )
    }

    /// Render individual diff rows as table rows
    fn render_diff_rows(&self, rows: &[DiffRow]) -> String {
        let mut html = String::new();

        for (index, row) in rows.iter().enumerate() {
            if row.operation == DiffOperation::Skipped {
                html.push_str(&format!(
                    r#"
            <tr class="{ROW_CLASS} diff-skip" data-row="{}"><td class="diff-skip-label" colspan="4">{} unchanged {}</td></tr>"#,
                    index,
                    row.skipped_lines,
                    if row.skipped_lines == 1 { "line" } else { "lines" }
                ));
                continue;
            }

            let (row_class, left_class, right_class) = match row.operation {
                DiffOperation::Unchanged => ("diff-row-unchanged", "", ""),
                DiffOperation::Removed => ("diff-row-removed", REMOVED_CLASS, "diff-empty"),
                DiffOperation::Added => ("diff-row-added", "diff-empty", ADDED_CLASS),
                DiffOperation::Changed => ("diff-row-changed", REMOVED_CLASS, ADDED_CLASS),
                DiffOperation::Skipped => unreachable!("skipped rows handled above"),
            };

            html.push_str(&format!(
                r#"
            <tr class="{ROW_CLASS} {}" data-row="{}"><td class="diff-line-number">{}</td><td class="diff-content {OLD_CELL_CLASS} {}">{}</td><td class="diff-line-number">{}</td><td class="diff-content {NEW_CELL_CLASS} {}">{}</td></tr>"#,
                row_class,
                index,
                line_number(row.old_line),
                left_class,
                escape_html(row.left_content.as_deref().unwrap_or("")),
                line_number(row.new_line),
                right_class,
                escape_html(row.right_content.as_deref().unwrap_or("")),
            ));
        }

        html
    }
}

fn line_number(line: Option<usize>) -> String {
    line.map(|n| n.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_render_basic_diff() {
        let renderer = HtmlDiffRenderer::new();
        let rows = vec![
            DiffRow::unchanged("same line".to_string(), 1, 1),
            DiffRow::added("added line".to_string(), 2),
            DiffRow::removed("removed line".to_string(), 2),
        ];

        let html = renderer.render("Fees", &rows, false);

        assert!(html.contains("diff-container"));
        assert!(html.contains("data-tab=\"Fees\""));
        assert!(html.contains("same line"));
        assert!(html.contains("added line"));
        assert!(html.contains("removed line"));
    }

    #[test]
    fn test_rendered_rows_parse_back() {
        let renderer = HtmlDiffRenderer::new();
        let rows = vec![
            DiffRow::unchanged("a".to_string(), 1, 1),
            DiffRow::changed("b".to_string(), "B".to_string(), 2, 2),
            DiffRow::skipped(4),
        ];

        let doc = Document::parse(&renderer.render("T", &rows, false));
        let rendered = doc.elements_by_class(ROW_CLASS);

        assert_eq!(rendered.len(), 3);
        assert_eq!(doc.attr(rendered[1], "data-row"), Some("1"));
        assert_eq!(doc.elements_by_class(REMOVED_CLASS).len(), 1);
        assert_eq!(doc.elements_by_class(ADDED_CLASS).len(), 1);
        assert!(doc.text_content(rendered[2]).contains("4 unchanged lines"));
    }

    #[test]
    fn test_content_is_escaped() {
        let renderer = HtmlDiffRenderer::new();
        let rows = vec![DiffRow::added("<b>bold</b>".to_string(), 1)];
        let html = renderer.render("T", &rows, false);

        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }
}
