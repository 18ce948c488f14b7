//! Wiring from provider payloads to views
//!
//! Every user selection takes a [`RequestTicket`]. Only the newest ticket is
//! current; a payload that arrives for an older one is discarded as
//! [`Applied::Stale`] instead of overwriting the newer view.

use crate::activation::{ActivationHooks, ActivationReport, ContentActivator};
use crate::config::ViewerConfig;
use crate::diff::DiffEngine;
use crate::dom::Document;
use crate::error::{CardDiffError, Result};
use crate::highlight::{count_occurrences, HighlightSession, HighlightStyle, KeywordQuery};
use crate::navigation::ComparisonWorkspace;
use crate::traits::{CardDataProvider, PageHost};
use crate::types::{ComparisonPayload, KeywordPayload, TabContent};
use crate::utils::format_date;
use std::cell::{Cell, RefCell};
use std::future::Future;
use tracing::debug;

/// Token identifying one user selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of applying a payload
#[derive(Debug)]
pub enum Applied<T> {
    Fresh(T),
    /// A newer selection was made while this payload was in flight
    Stale,
}

impl<T> Applied<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Applied::Stale)
    }

    pub fn fresh(self) -> Option<T> {
        match self {
            Applied::Fresh(view) => Some(view),
            Applied::Stale => None,
        }
    }
}

/// A single card version rendered as-is
#[derive(Debug)]
pub struct CardView {
    pub card_id: String,
    pub document: Document,
    pub activation: ActivationReport,
}

impl CardView {
    pub fn markup(&self) -> String {
        self.document.to_html()
    }
}

/// Two versions of a card diffed tab by tab
#[derive(Debug)]
pub struct ComparisonView {
    pub card_id: String,
    pub version1: u32,
    pub version2: u32,
    /// Display form of the older version's timestamp
    pub v1_date: Option<String>,
    /// Display form of the newer version's timestamp
    pub v2_date: Option<String>,
    pub workspace: ComparisonWorkspace,
}

/// One card version searched for a keyword
#[derive(Debug)]
pub struct KeywordView {
    pub card_id: String,
    pub version: u32,
    tabs: Vec<TabContent>,
    query: Option<KeywordQuery>,
    badges: Vec<(String, usize)>,
    active: usize,
    session: HighlightSession,
    style: HighlightStyle,
}

impl KeywordView {
    pub fn new(payload: KeywordPayload, raw_keyword: &str, style: HighlightStyle) -> Self {
        let query = KeywordQuery::parse(raw_keyword);
        let badges = badge_counts(&payload.changes, query.as_ref());
        let session = build_session(&payload.changes, 0, query.clone(), &style);

        Self {
            card_id: payload.card_id,
            version: payload.version,
            tabs: payload.changes,
            query,
            badges,
            active: 0,
            session,
            style,
        }
    }

    /// Occurrence count per tab, in tab order
    pub fn badges(&self) -> &[(String, usize)] {
        &self.badges
    }

    pub fn query(&self) -> Option<&KeywordQuery> {
        self.query.as_ref()
    }

    pub fn active_tab(&self) -> usize {
        self.active
    }

    pub fn tab_names(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|tab| tab.tab_name.as_str())
    }

    pub fn session(&self) -> &HighlightSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut HighlightSession {
        &mut self.session
    }

    /// Show another tab; occurrences are recomputed and the cursor starts idle
    pub fn switch_tab(&mut self, index: usize) -> Result<()> {
        if index >= self.tabs.len() {
            return Err(CardDiffError::TabNotFound {
                tab: format!("#{index}"),
            });
        }
        self.active = index;
        self.session = build_session(&self.tabs, index, self.query.clone(), &self.style);
        Ok(())
    }

    pub fn switch_tab_by_name(&mut self, name: &str) -> Result<()> {
        let index = self
            .tabs
            .iter()
            .position(|tab| tab.tab_name == name)
            .ok_or_else(|| CardDiffError::TabNotFound {
                tab: name.to_string(),
            })?;
        self.switch_tab(index)
    }

    /// Search for a new keyword, keeping the active tab
    pub fn set_keyword(&mut self, raw_keyword: &str) {
        self.query = KeywordQuery::parse(raw_keyword);
        self.badges = badge_counts(&self.tabs, self.query.as_ref());
        self.session = build_session(&self.tabs, self.active, self.query.clone(), &self.style);
    }
}

fn badge_counts(tabs: &[TabContent], query: Option<&KeywordQuery>) -> Vec<(String, usize)> {
    tabs.iter()
        .map(|tab| {
            let count = query
                .map(|q| count_occurrences(&tab.content, &q.keyword, q.mode))
                .unwrap_or(0);
            (tab.tab_name.clone(), count)
        })
        .collect()
}

fn build_session(
    tabs: &[TabContent],
    index: usize,
    query: Option<KeywordQuery>,
    style: &HighlightStyle,
) -> HighlightSession {
    let content = tabs.get(index).map(|tab| tab.content.as_str()).unwrap_or("");
    HighlightSession::new(content, query, style.clone())
}

/// Builds views from provider payloads and rejects out-of-date ones
#[derive(Debug)]
pub struct ViewOrchestrator {
    config: ViewerConfig,
    engine: DiffEngine,
    activator: RefCell<ContentActivator>,
    generation: Cell<u64>,
}

impl ViewOrchestrator {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            engine: DiffEngine::from_config(&config),
            config,
            activator: RefCell::new(ContentActivator::new()),
            generation: Cell::new(0),
        }
    }

    pub fn with_hooks(mut self, hooks: ActivationHooks) -> Self {
        self.activator = RefCell::new(ContentActivator::with_hooks(hooks));
        self
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Start a new selection, making every earlier ticket stale
    pub fn select(&self) -> RequestTicket {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        RequestTicket { generation }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.generation.get()
    }

    /// Parse a card document and activate its embedded fragments
    pub fn apply_card<H: PageHost>(
        &self,
        ticket: &RequestTicket,
        card_id: &str,
        html: &str,
        host: &mut H,
    ) -> Applied<CardView> {
        if !self.is_current(ticket) {
            debug!(card = %card_id, generation = ticket.generation, "discarding stale card");
            return Applied::Stale;
        }
        let mut document = Document::parse(html);
        let activation = self.activator.borrow_mut().activate(&mut document, host);

        Applied::Fresh(CardView {
            card_id: card_id.to_string(),
            document,
            activation,
        })
    }

    /// Decode a comparison payload and diff every tab
    pub fn apply_comparison(&self, ticket: &RequestTicket, json: &str) -> Result<Applied<ComparisonView>> {
        if !self.is_current(ticket) {
            debug!(generation = ticket.generation, "discarding stale comparison");
            return Ok(Applied::Stale);
        }
        let payload = ComparisonPayload::from_json(json)?;
        let workspace =
            ComparisonWorkspace::from_changes(self.engine.clone(), &payload.changes, self.config.diff.mode);

        Ok(Applied::Fresh(ComparisonView {
            card_id: payload.card_id,
            version1: payload.version1,
            version2: payload.version2,
            v1_date: payload.v1_date.as_deref().map(format_date),
            v2_date: payload.v2_date.as_deref().map(format_date),
            workspace,
        }))
    }

    /// Decode tab contents and highlight the keyword in the first tab
    pub fn apply_keyword(
        &self,
        ticket: &RequestTicket,
        json: &str,
        raw_keyword: &str,
    ) -> Result<Applied<KeywordView>> {
        if !self.is_current(ticket) {
            debug!(generation = ticket.generation, "discarding stale keyword result");
            return Ok(Applied::Stale);
        }
        let payload = KeywordPayload::from_json(json)?;
        let style = HighlightStyle::from(&self.config.highlight);
        Ok(Applied::Fresh(KeywordView::new(payload, raw_keyword, style)))
    }

    /// Fetch and apply a card; the ticket is taken when this is called
    pub fn load_card<'a, P, H>(
        &'a self,
        provider: &'a P,
        card_id: &'a str,
        host: &'a mut H,
    ) -> impl Future<Output = Result<Applied<CardView>>> + 'a
    where
        P: CardDataProvider,
        H: PageHost,
    {
        let ticket = self.select();
        async move {
            let html = provider.fetch_card_html(card_id).await?;
            Ok(self.apply_card(&ticket, card_id, &html, host))
        }
    }

    /// Fetch and apply a comparison; the ticket is taken when this is called
    pub fn load_comparison<'a, P: CardDataProvider>(
        &'a self,
        provider: &'a P,
        card_id: &'a str,
        version1: u32,
        version2: u32,
    ) -> impl Future<Output = Result<Applied<ComparisonView>>> + 'a {
        let ticket = self.select();
        async move {
            let json = provider.fetch_comparison(card_id, version1, version2).await?;
            self.apply_comparison(&ticket, &json)
        }
    }

    /// Fetch and apply a keyword search; the ticket is taken when this is called
    pub fn load_keyword<'a, P: CardDataProvider>(
        &'a self,
        provider: &'a P,
        card_id: &'a str,
        version: u32,
        raw_keyword: &'a str,
    ) -> impl Future<Output = Result<Applied<KeywordView>>> + 'a {
        let ticket = self.select();
        async move {
            let json = provider.fetch_tab_contents(card_id, version).await?;
            self.apply_keyword(&ticket, &json, raw_keyword)
        }
    }
}

impl Default for ViewOrchestrator {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}
