//! Keyword occurrences of one rendered tab and the cursor over them

use super::keyword::{HighlightStyle, KeywordHighlighter, KeywordQuery};
use crate::dom::{Document, NodeId};
use crate::navigation::NavigationCursor;
use tracing::{debug, warn};

/// A marked match in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordOccurrence {
    pub ordinal: usize,
    pub node: NodeId,
    pub text: String,
}

/// Highlighted document plus navigation state
///
/// A session is built for one (content, keyword) pair. A new keyword or a
/// different tab means a new session, which starts idle.
#[derive(Debug, Clone)]
pub struct HighlightSession {
    document: Document,
    query: Option<KeywordQuery>,
    occurrences: Vec<KeywordOccurrence>,
    cursor: NavigationCursor,
    style: HighlightStyle,
}

impl HighlightSession {
    pub fn new(html: &str, query: Option<KeywordQuery>, style: HighlightStyle) -> Self {
        let mut document = Document::parse(html);
        let mut occurrences = Vec::new();

        if let Some(query) = &query {
            match KeywordHighlighter::new(query.clone()) {
                Ok(highlighter) => {
                    let highlighter = highlighter.with_style(style.clone());
                    for (ordinal, node) in highlighter
                        .highlight_document(&mut document)
                        .into_iter()
                        .enumerate()
                    {
                        occurrences.push(KeywordOccurrence {
                            ordinal,
                            node,
                            text: document.text_content(node),
                        });
                    }
                }
                Err(e) => warn!(keyword = %query.keyword, error = %e, "keyword pattern rejected"),
            }
            debug!(keyword = %query.keyword, occurrences = occurrences.len(), "highlighted keyword");
        }

        Self {
            cursor: NavigationCursor::new(occurrences.len()),
            document,
            query,
            occurrences,
            style,
        }
    }

    pub fn query(&self) -> Option<&KeywordQuery> {
        self.query.as_ref()
    }

    pub fn occurrences(&self) -> &[KeywordOccurrence] {
        &self.occurrences
    }

    pub fn occurrence_count(&self) -> usize {
        self.occurrences.len()
    }

    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The focused occurrence, if any
    pub fn active(&self) -> Option<&KeywordOccurrence> {
        self.cursor.index().and_then(|i| self.occurrences.get(i))
    }

    pub fn next(&mut self) -> Option<&KeywordOccurrence> {
        self.cursor.next()?;
        self.refresh_states();
        self.active()
    }

    pub fn prev(&mut self) -> Option<&KeywordOccurrence> {
        self.cursor.prev()?;
        self.refresh_states();
        self.active()
    }

    pub fn reset(&mut self) {
        self.cursor.reset();
        self.refresh_states();
    }

    pub fn position_label(&self) -> String {
        self.cursor.label()
    }

    /// Serialized document with current marker states
    pub fn markup(&self) -> String {
        self.document.to_html()
    }

    fn refresh_states(&mut self) {
        let active = self.cursor.index();
        for occurrence in &self.occurrences {
            let is_active = active == Some(occurrence.ordinal);
            let node = occurrence.node;
            if is_active {
                self.document.add_class(node, "active");
            } else {
                self.document.remove_class(node, "active");
            }
            self.document
                .set_attr(node, "data-state", if is_active { "active" } else { "inactive" });
            self.document
                .set_attr(node, "style", &self.style.inline_style(is_active));
        }
    }
}
