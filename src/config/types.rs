use crate::diff::{DiffMode, DEFAULT_CONTEXT_LINES, DEFAULT_NEW_MARKER, DEFAULT_OLD_MARKER};
use crate::highlight::keyword::{DEFAULT_ACTIVE_COLOR, DEFAULT_INACTIVE_COLOR, DEFAULT_MARKER_CLASS};
use crate::text::NormalizeOptions;
use serde::{Deserialize, Serialize};

/// Viewer configuration, usually read from `card-diff.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ViewerConfig {
    /// Whitespace normalization applied before diffing
    #[serde(default)]
    pub normalize: NormalizeOptions,
    /// Diff rendering settings
    #[serde(default)]
    pub diff: DiffConfig,
    /// Keyword marker appearance
    #[serde(default)]
    pub highlight: HighlightConfig,
}

/// Diff rendering settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Initial mode for new comparison views
    pub mode: DiffMode,
    /// Unchanged lines shown around each change in focused mode
    pub context_lines: usize,
    /// Line appended to the old side when both versions are identical
    pub old_marker: String,
    /// Line appended to the new side when both versions are identical
    pub new_marker: String,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            mode: DiffMode::default(),
            context_lines: DEFAULT_CONTEXT_LINES,
            old_marker: DEFAULT_OLD_MARKER.to_string(),
            new_marker: DEFAULT_NEW_MARKER.to_string(),
        }
    }
}

/// Keyword marker appearance
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Class carried by every marker element
    pub marker_class: String,
    /// Background of the focused occurrence
    pub active_color: String,
    /// Background of every other occurrence
    pub inactive_color: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            active_color: DEFAULT_ACTIVE_COLOR.to_string(),
            inactive_color: DEFAULT_INACTIVE_COLOR.to_string(),
        }
    }
}
