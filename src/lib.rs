//! Card Diff - comparison, keyword search and markup activation for card pages
//!
//! This crate takes externally sourced card markup and provides three
//! services on top of it: a line diff between two versions with navigation
//! over groups of changed rows, keyword highlighting with navigation over
//! occurrences, and one-time activation of the styles and scripts embedded
//! in injected markup.

// Core modules
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Markup and text handling
pub mod dom;
pub mod text;
pub mod utils;

// Main functionality modules
pub mod activation;
pub mod diff;
pub mod highlight;
pub mod navigation;
pub mod orchestrator;

// Re-export main types for convenience
pub use activation::{ActivationHooks, ActivationReport, ContentActivator, Page};
pub use config::{DiffConfig, HighlightConfig, ViewerConfig};
pub use diff::{align_comparison, DiffEngine, DiffMode, DiffResult, DiffRow};
pub use dom::{Document, NodeId};
pub use error::{CardDiffError, Result};
pub use highlight::{
    count_occurrences, highlight, HighlightSession, KeywordHighlighter, KeywordQuery, SearchMode,
};
pub use navigation::{ChangeGroup, ChangeGroupIndex, ComparisonWorkspace, NavigationCursor};
pub use orchestrator::{Applied, CardView, ComparisonView, KeywordView, RequestTicket, ViewOrchestrator};
pub use text::{extract_text, normalize, NormalizeOptions, NormalizedText, Preset, TextNormalizer};
pub use traits::{CardDataProvider, PageHost};
pub use types::{ComparisonPayload, KeywordPayload, TabChange, TabContent};

/// Normalize two texts with default options and diff them
pub fn compute_diff(tab_name: &str, old: &str, new: &str, mode: DiffMode) -> DiffResult {
    DiffEngine::new().diff_texts(tab_name, old, new, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_imports() {
        let config = ViewerConfig::default();
        let engine = DiffEngine::from_config(&config);
        let result = engine.diff_texts("Fees", "a", "b", config.diff.mode);
        assert!(result.has_changes());

        let (_, count) = highlight("<p>a b a</p>", "a", SearchMode::Substring);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_compute_diff_convenience() {
        let result = compute_diff("T", "x\ny", "x\ny", DiffMode::Focused);
        assert!(result.is_degenerate);
    }
}
