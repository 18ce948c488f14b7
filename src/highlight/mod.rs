pub mod keyword;
pub mod session;

pub use keyword::{
    count_occurrences, highlight, HighlightStyle, KeywordHighlighter, KeywordQuery, SearchMode,
};
pub use session::{HighlightSession, KeywordOccurrence};
