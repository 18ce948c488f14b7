//! Shared fixtures and mocks for card-diff integration tests

#![allow(dead_code)]

use card_diff::{
    activation::{ScriptFragment, StyleDeclaration},
    error::{CardDiffError, Result},
    traits::{CardDataProvider, PageHost},
    types::TabChange,
};
use std::collections::HashMap;

/// Install a test-writer subscriber so `tracing` output shows up on failure
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("card_diff=debug"))
        .with_test_writer()
        .try_init();
}

pub fn tab_change(name: &str, old: &str, new: &str) -> TabChange {
    TabChange {
        tab_name: name.to_string(),
        old_content: old.to_string(),
        new_content: new.to_string(),
    }
}

/// Comparison payload JSON for one card
pub fn comparison_json(card_id: &str, version1: u32, version2: u32, tabs: &[(&str, &str, &str)]) -> String {
    let changes: Vec<serde_json::Value> = tabs
        .iter()
        .map(|(name, old, new)| {
            serde_json::json!({ "tabName": name, "oldContent": old, "newContent": new })
        })
        .collect();
    serde_json::json!({
        "cardId": card_id,
        "version1": version1,
        "version2": version2,
        "v1_date": "2025-03-01T09:30:00",
        "v2_date": "2025-04-01T17:45:00",
        "changes": changes,
    })
    .to_string()
}

/// Tab contents payload JSON for one card version
pub fn tab_contents_json(card_id: &str, version: u32, tabs: &[(&str, &str)]) -> String {
    let changes: Vec<serde_json::Value> = tabs
        .iter()
        .map(|(name, content)| serde_json::json!({ "tab_name": name, "content": content }))
        .collect();
    serde_json::json!({ "cardId": card_id, "version": version, "changes": changes }).to_string()
}

pub fn card_html() -> String {
    r#"<html><head><style>.fees { color: #333 }</style></head>
<body>
<div class="card"><h2>Regalia</h2><p class="fees">Annual fee 2500</p></div>
<script>window.cardReady = true;</script>
</body></html>"#
        .to_string()
}

/// In-memory card data provider keyed by request
#[derive(Clone, Default)]
pub struct MockCardProvider {
    pub cards: HashMap<String, String>,
    pub comparisons: HashMap<(String, u32, u32), String>,
    pub tab_contents: HashMap<(String, u32), String>,
}

impl MockCardProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_card(mut self, card_id: &str, html: String) -> Self {
        self.cards.insert(card_id.to_string(), html);
        self
    }

    pub fn with_comparison(mut self, card_id: &str, version1: u32, version2: u32, json: String) -> Self {
        self.comparisons
            .insert((card_id.to_string(), version1, version2), json);
        self
    }

    pub fn with_tab_contents(mut self, card_id: &str, version: u32, json: String) -> Self {
        self.tab_contents.insert((card_id.to_string(), version), json);
        self
    }
}

impl CardDataProvider for MockCardProvider {
    async fn fetch_card_html(&self, card_id: &str) -> Result<String> {
        self.cards
            .get(card_id)
            .cloned()
            .ok_or_else(|| CardDiffError::provider(card_id, "card not found"))
    }

    async fn fetch_comparison(&self, card_id: &str, version1: u32, version2: u32) -> Result<String> {
        self.comparisons
            .get(&(card_id.to_string(), version1, version2))
            .cloned()
            .ok_or_else(|| CardDiffError::provider(card_id, "comparison not found"))
    }

    async fn fetch_tab_contents(&self, card_id: &str, version: u32) -> Result<String> {
        self.tab_contents
            .get(&(card_id.to_string(), version))
            .cloned()
            .ok_or_else(|| CardDiffError::provider(card_id, "version not found"))
    }
}

/// Page host that refuses scripts whose body mentions `fail`
#[derive(Default)]
pub struct PickyPage {
    pub styles: Vec<StyleDeclaration>,
    pub scripts: Vec<ScriptFragment>,
}

impl PageHost for PickyPage {
    fn inject_style(&mut self, style: StyleDeclaration) -> Result<()> {
        self.styles.push(style);
        Ok(())
    }

    fn run_script(&mut self, script: ScriptFragment) -> Result<()> {
        if script.body.contains("fail") {
            return Err(CardDiffError::general("script threw"));
        }
        self.scripts.push(script);
        Ok(())
    }
}
