//! Line-level diff between two versions of a comparison tab

use super::data::{DiffMode, DiffResult, DiffRow};
use super::renderer::HtmlDiffRenderer;
use crate::config::{DiffConfig, ViewerConfig};
use crate::text::{NormalizedText, TextNormalizer};
use prettydiff::{basic::DiffOp, diff_slice};
use tracing::debug;

/// Marker appended to the old side of a degenerate diff
pub const DEFAULT_OLD_MARKER: &str = "[end of previous version]";
/// Marker appended to the new side of a degenerate diff
pub const DEFAULT_NEW_MARKER: &str = "[end of current version]";
/// Unchanged lines kept around each change in focused mode
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Pure diff engine: normalized text in, [`DiffResult`] out
#[derive(Debug, Clone)]
pub struct DiffEngine {
    normalizer: TextNormalizer,
    context_lines: usize,
    old_marker: String,
    new_marker: String,
    renderer: HtmlDiffRenderer,
}

impl DiffEngine {
    /// Create an engine with default normalization and markers
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::default(),
            context_lines: DEFAULT_CONTEXT_LINES,
            old_marker: DEFAULT_OLD_MARKER.to_string(),
            new_marker: DEFAULT_NEW_MARKER.to_string(),
            renderer: HtmlDiffRenderer::new(),
        }
    }

    /// Create an engine from the viewer configuration
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new()
            .with_normalizer(TextNormalizer::new(config.normalize))
            .with_diff_config(&config.diff)
    }

    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_diff_config(mut self, diff: &DiffConfig) -> Self {
        self.context_lines = diff.context_lines;
        self.old_marker = diff.old_marker.clone();
        self.new_marker = diff.new_marker.clone();
        self
    }

    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Normalize two raw texts and diff them
    pub fn diff_texts(&self, tab_name: &str, old: &str, new: &str, mode: DiffMode) -> DiffResult {
        let old = self.normalizer.normalize(old);
        let new = self.normalizer.normalize(new);
        self.compute_diff(tab_name, old, new, mode)
    }

    /// Diff the visible text of two markup fragments, such as one tab's HTML
    /// in two card versions
    pub fn diff_markup(&self, tab_name: &str, old_html: &str, new_html: &str, mode: DiffMode) -> DiffResult {
        let old = self.normalizer.normalize_markup(old_html);
        let new = self.normalizer.normalize_markup(new_html);
        self.compute_diff(tab_name, old, new, mode)
    }

    /// Diff two normalized texts
    ///
    /// Identical inputs get distinguishable marker lines appended to each side
    /// so the result still has something to render; such results are flagged
    /// `is_degenerate` and never contribute change groups.
    pub fn compute_diff(
        &self,
        tab_name: &str,
        old: NormalizedText,
        new: NormalizedText,
        mode: DiffMode,
    ) -> DiffResult {
        let is_degenerate = old == new;

        let rows = if is_degenerate {
            let old_side = append_marker(&old, &self.old_marker);
            let new_side = append_marker(&new, &self.new_marker);
            diff_rows(&old_side, &new_side)
        } else {
            diff_rows(&old, &new)
        };

        let rows = match mode {
            DiffMode::Exhaustive => rows,
            DiffMode::Focused => focus_rows(rows, self.context_lines),
        };

        debug!(
            tab = %tab_name,
            rows = rows.len(),
            degenerate = is_degenerate,
            ?mode,
            "computed diff"
        );

        let rendered_markup = self.renderer.render(tab_name, &rows, is_degenerate);

        DiffResult {
            tab_name: tab_name.to_string(),
            old_content: old,
            new_content: new,
            mode,
            rows,
            rendered_markup,
            is_degenerate,
        }
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn append_marker(text: &str, marker: &str) -> String {
    if text.is_empty() {
        marker.to_string()
    } else {
        format!("{text}\n{marker}")
    }
}

/// Full-context aligned rows for two texts
fn diff_rows(old: &str, new: &str) -> Vec<DiffRow> {
    let lines1: Vec<&str> = old.lines().collect();
    let lines2: Vec<&str> = new.lines().collect();

    let diff = diff_slice(&lines1, &lines2);

    let mut rows = Vec::with_capacity(lines1.len().max(lines2.len()));
    let mut old_line = 0;
    let mut new_line = 0;

    for op in diff.diff {
        match op {
            DiffOp::Equal(lines) => {
                for line in lines {
                    old_line += 1;
                    new_line += 1;
                    rows.push(DiffRow::unchanged(line.to_string(), old_line, new_line));
                }
            }
            DiffOp::Remove(lines) => {
                for line in lines {
                    old_line += 1;
                    rows.push(DiffRow::removed(line.to_string(), old_line));
                }
            }
            DiffOp::Insert(lines) => {
                for line in lines {
                    new_line += 1;
                    rows.push(DiffRow::added(line.to_string(), new_line));
                }
            }
            DiffOp::Replace(old_lines, new_lines) => {
                let max_lines = old_lines.len().max(new_lines.len());

                for i in 0..max_lines {
                    match (old_lines.get(i), new_lines.get(i)) {
                        (Some(old), Some(new)) => {
                            old_line += 1;
                            new_line += 1;
                            rows.push(DiffRow::changed(
                                old.to_string(),
                                new.to_string(),
                                old_line,
                                new_line,
                            ));
                        }
                        (Some(old), None) => {
                            old_line += 1;
                            rows.push(DiffRow::removed(old.to_string(), old_line));
                        }
                        (None, Some(new)) => {
                            new_line += 1;
                            rows.push(DiffRow::added(new.to_string(), new_line));
                        }
                        (None, None) => {}
                    }
                }
            }
        }
    }

    rows
}

/// Keep `context` unchanged rows around each change, eliding the rest
fn focus_rows(rows: Vec<DiffRow>, context: usize) -> Vec<DiffRow> {
    let mut keep = vec![false; rows.len()];
    for (i, row) in rows.iter().enumerate() {
        if row.operation.is_change() {
            let start = i.saturating_sub(context);
            let end = (i + context).min(rows.len().saturating_sub(1));
            for slot in &mut keep[start..=end] {
                *slot = true;
            }
        }
    }

    let mut focused = Vec::new();
    let mut elided = 0;
    for (row, kept) in rows.into_iter().zip(keep) {
        if kept {
            if elided > 0 {
                focused.push(DiffRow::skipped(elided));
                elided = 0;
            }
            focused.push(row);
        } else {
            elided += 1;
        }
    }
    if elided > 0 {
        focused.push(DiffRow::skipped(elided));
    }
    focused
}
