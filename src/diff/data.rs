//! Diff data structures that separate data from presentation
//!
//! The engine produces a list of [`DiffRow`]s; the HTML renderer turns them
//! into the side-by-side markup that navigation later scans.

use crate::text::NormalizedText;
use serde::{Deserialize, Serialize};

/// Type of operation in a diff row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOperation {
    /// Line is identical in both versions
    Unchanged,
    /// Line exists only in the old version
    Removed,
    /// Line exists only in the new version
    Added,
    /// Old line replaced by a new line on the same row
    Changed,
    /// Placeholder for a run of unchanged lines elided in focused mode
    Skipped,
}

impl DiffOperation {
    /// Whether the row shows an insertion or deletion on either side
    pub fn is_change(self) -> bool {
        matches!(
            self,
            DiffOperation::Removed | DiffOperation::Added | DiffOperation::Changed
        )
    }
}

/// A single aligned row of the side-by-side diff
#[derive(Debug, Clone, PartialEq)]
pub struct DiffRow {
    pub operation: DiffOperation,
    /// Content of the old column
    pub left_content: Option<String>,
    /// Content of the new column
    pub right_content: Option<String>,
    /// 1-based line number in the old version
    pub old_line: Option<usize>,
    /// 1-based line number in the new version
    pub new_line: Option<usize>,
    /// Number of elided lines for a skipped row
    pub skipped_lines: usize,
}

impl DiffRow {
    pub fn unchanged(content: String, old_line: usize, new_line: usize) -> Self {
        Self {
            operation: DiffOperation::Unchanged,
            left_content: Some(content.clone()),
            right_content: Some(content),
            old_line: Some(old_line),
            new_line: Some(new_line),
            skipped_lines: 0,
        }
    }

    pub fn removed(content: String, old_line: usize) -> Self {
        Self {
            operation: DiffOperation::Removed,
            left_content: Some(content),
            right_content: None,
            old_line: Some(old_line),
            new_line: None,
            skipped_lines: 0,
        }
    }

    pub fn added(content: String, new_line: usize) -> Self {
        Self {
            operation: DiffOperation::Added,
            left_content: None,
            right_content: Some(content),
            old_line: None,
            new_line: Some(new_line),
            skipped_lines: 0,
        }
    }

    pub fn changed(left: String, right: String, old_line: usize, new_line: usize) -> Self {
        Self {
            operation: DiffOperation::Changed,
            left_content: Some(left),
            right_content: Some(right),
            old_line: Some(old_line),
            new_line: Some(new_line),
            skipped_lines: 0,
        }
    }

    pub fn skipped(count: usize) -> Self {
        Self {
            operation: DiffOperation::Skipped,
            left_content: None,
            right_content: None,
            old_line: None,
            new_line: None,
            skipped_lines: count,
        }
    }
}

/// How much unchanged context surrounds each change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// A few unchanged lines around each change, gaps elided
    #[default]
    Focused,
    /// Every line of both versions
    Exhaustive,
}

/// Row counts per operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub unchanged: usize,
}

/// Diff of one comparison tab between two versions
///
/// Created per (version pair, tab) and replaced wholesale when either changes.
#[derive(Debug, Clone)]
pub struct DiffResult {
    pub tab_name: String,
    pub old_content: NormalizedText,
    pub new_content: NormalizedText,
    pub mode: DiffMode,
    pub rows: Vec<DiffRow>,
    /// Side-by-side HTML produced from `rows`
    pub rendered_markup: String,
    /// Inputs were identical and marker suffixes were appended to force a diff
    pub is_degenerate: bool,
}

impl DiffResult {
    /// Whether there are real (non-degenerate) changes
    pub fn has_changes(&self) -> bool {
        !self.is_degenerate && self.rows.iter().any(|row| row.operation.is_change())
    }

    /// Row statistics; a degenerate diff reports no changes
    pub fn stats(&self) -> DiffStats {
        if self.is_degenerate {
            return DiffStats {
                unchanged: self.old_content.lines().count(),
                ..DiffStats::default()
            };
        }
        let mut stats = DiffStats::default();
        for row in &self.rows {
            match row.operation {
                DiffOperation::Added => stats.added += 1,
                DiffOperation::Removed => stats.removed += 1,
                DiffOperation::Changed => stats.changed += 1,
                DiffOperation::Unchanged => stats.unchanged += 1,
                DiffOperation::Skipped => stats.unchanged += row.skipped_lines,
            }
        }
        stats
    }
}
