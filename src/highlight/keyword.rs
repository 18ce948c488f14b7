//! Keyword matching and marking over the visible text of a document
//!
//! Only text nodes are searched, so tag names, attribute values and the
//! bodies of `script`/`style` elements never match. Keywords are escaped
//! before the pattern is compiled.

use crate::config::HighlightConfig;
use crate::dom::{Document, NodeId};
use crate::error::Result;
use regex::Regex;
use tracing::warn;

pub const DEFAULT_MARKER_CLASS: &str = "highlighted-keyword";
pub const DEFAULT_ACTIVE_COLOR: &str = "orange";
pub const DEFAULT_INACTIVE_COLOR: &str = "yellow";

/// How a keyword is matched against text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Anywhere, case-insensitive
    #[default]
    Substring,
    /// Whole word, case-insensitive, with an optional trailing `s`
    ExactWord,
}

/// A parsed search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    pub keyword: String,
    pub mode: SearchMode,
}

impl KeywordQuery {
    pub fn new<S: Into<String>>(keyword: S, mode: SearchMode) -> Self {
        Self {
            keyword: keyword.into(),
            mode,
        }
    }

    /// Parse user input: `"word"` in double quotes asks for exact-word matching
    ///
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (keyword, mode) = match trimmed
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            Some(inner) => (inner.trim(), SearchMode::ExactWord),
            None => (trimmed, SearchMode::Substring),
        };
        if keyword.is_empty() {
            return None;
        }
        Some(Self::new(keyword, mode))
    }
}

/// Marker class and colours for highlighted occurrences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStyle {
    pub marker_class: String,
    pub active_color: String,
    pub inactive_color: String,
}

impl HighlightStyle {
    pub fn inline_style(&self, active: bool) -> String {
        let color = if active {
            &self.active_color
        } else {
            &self.inactive_color
        };
        format!("background-color: {color}; font-weight: bold;")
    }
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            active_color: DEFAULT_ACTIVE_COLOR.to_string(),
            inactive_color: DEFAULT_INACTIVE_COLOR.to_string(),
        }
    }
}

impl From<&HighlightConfig> for HighlightStyle {
    fn from(config: &HighlightConfig) -> Self {
        Self {
            marker_class: config.marker_class.clone(),
            active_color: config.active_color.clone(),
            inactive_color: config.inactive_color.clone(),
        }
    }
}

/// Compiled matcher for one query
#[derive(Debug, Clone)]
pub struct KeywordHighlighter {
    query: KeywordQuery,
    pattern: Regex,
    style: HighlightStyle,
}

impl KeywordHighlighter {
    pub fn new(query: KeywordQuery) -> Result<Self> {
        let escaped = regex::escape(&query.keyword);
        let pattern = match query.mode {
            SearchMode::Substring => Regex::new(&format!("(?i){escaped}"))?,
            SearchMode::ExactWord => Regex::new(&format!("(?i){escaped}s?"))?,
        };
        Ok(Self {
            query,
            pattern,
            style: HighlightStyle::default(),
        })
    }

    pub fn with_style(mut self, style: HighlightStyle) -> Self {
        self.style = style;
        self
    }

    pub fn query(&self) -> &KeywordQuery {
        &self.query
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    /// Byte ranges of every match in a plain string
    pub fn find_matches(&self, text: &str) -> Vec<(usize, usize)> {
        match self.query.mode {
            SearchMode::Substring => self
                .pattern
                .find_iter(text)
                .map(|m| (m.start(), m.end()))
                .collect(),
            SearchMode::ExactWord => self.find_words(text),
        }
    }

    fn find_words(&self, text: &str) -> Vec<(usize, usize)> {
        let mut matches = Vec::new();
        let mut start = 0;
        while let Some(m) = self.pattern.find_at(text, start) {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
                matches.push((m.start(), m.end()));
                start = m.end();
            } else {
                start = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
            }
            if start >= text.len() {
                break;
            }
        }
        matches
    }

    /// Count matches in the visible text of `html` without marking anything
    pub fn count_occurrences(&self, html: &str) -> usize {
        let doc = Document::parse(html);
        doc.text_nodes()
            .into_iter()
            .filter_map(|id| doc.text(id))
            .map(|text| self.find_matches(text).len())
            .sum()
    }

    /// Wrap every match in a marker element, returning markers in document order
    pub fn highlight_document(&self, doc: &mut Document) -> Vec<NodeId> {
        let mut markers = Vec::new();

        for node in doc.text_nodes() {
            let Some(text) = doc.text(node).map(str::to_string) else {
                continue;
            };
            let matches = self.find_matches(&text);
            if matches.is_empty() {
                continue;
            }

            let mut replacements = Vec::with_capacity(matches.len() * 2 + 1);
            let mut cursor = 0;
            for (start, end) in matches {
                if start > cursor {
                    replacements.push(doc.create_text(&text[cursor..start]));
                }
                let marker = self.create_marker(doc, markers.len(), &text[start..end]);
                replacements.push(marker);
                markers.push(marker);
                cursor = end;
            }
            if cursor < text.len() {
                replacements.push(doc.create_text(&text[cursor..]));
            }
            doc.replace_with(node, &replacements);
        }

        markers
    }

    /// Highlight `html`, returning the marked-up markup and the match count
    pub fn highlight(&self, html: &str) -> (String, usize) {
        let mut doc = Document::parse(html);
        let markers = self.highlight_document(&mut doc);
        (doc.to_html(), markers.len())
    }

    fn create_marker(&self, doc: &mut Document, ordinal: usize, matched: &str) -> NodeId {
        let marker = doc.create_element(
            "span",
            vec![
                ("class".to_string(), self.style.marker_class.clone()),
                ("data-occurrence".to_string(), ordinal.to_string()),
                ("data-state".to_string(), "inactive".to_string()),
                ("style".to_string(), self.style.inline_style(false)),
            ],
        );
        let text = doc.create_text(matched);
        doc.append_child(marker, text);
        marker
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Highlight `keyword` in `document_text`; a blank keyword leaves the text as is
pub fn highlight(document_text: &str, keyword: &str, mode: SearchMode) -> (String, usize) {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return (document_text.to_string(), 0);
    }
    match KeywordHighlighter::new(KeywordQuery::new(keyword, mode)) {
        Ok(highlighter) => highlighter.highlight(document_text),
        Err(e) => {
            warn!(keyword = %keyword, error = %e, "keyword pattern rejected");
            (document_text.to_string(), 0)
        }
    }
}

/// Count occurrences of `keyword` in the visible text of `document_text`
pub fn count_occurrences(document_text: &str, keyword: &str, mode: SearchMode) -> usize {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return 0;
    }
    match KeywordHighlighter::new(KeywordQuery::new(keyword, mode)) {
        Ok(highlighter) => highlighter.count_occurrences(document_text),
        Err(e) => {
            warn!(keyword = %keyword, error = %e, "keyword pattern rejected");
            0
        }
    }
}
