//! Payloads returned by the card data provider

use crate::error::{CardDiffError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Two versions of a card, tab by tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPayload {
    #[serde(rename = "cardId", deserialize_with = "string_or_number")]
    pub card_id: String,
    pub version1: u32,
    pub version2: u32,
    #[serde(default)]
    pub v1_date: Option<String>,
    #[serde(default)]
    pub v2_date: Option<String>,
    #[serde(default)]
    pub changes: Vec<TabChange>,
}

/// One tab's content in both compared versions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabChange {
    #[serde(rename = "tabName")]
    pub tab_name: String,
    #[serde(rename = "oldContent", default)]
    pub old_content: String,
    #[serde(rename = "newContent", default)]
    pub new_content: String,
}

/// Every tab of one card version, used for keyword search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordPayload {
    #[serde(rename = "cardId", deserialize_with = "string_or_number")]
    pub card_id: String,
    pub version: u32,
    #[serde(default)]
    pub changes: Vec<TabContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabContent {
    pub tab_name: String,
    #[serde(default)]
    pub content: String,
}

impl ComparisonPayload {
    /// Decode a comparison payload; tab names must be unique
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: Self = serde_json::from_str(json)?;
        ensure_unique_tabs(&payload.card_id, payload.changes.iter().map(|c| c.tab_name.as_str()))?;
        Ok(payload)
    }

    pub fn tab(&self, name: &str) -> Option<&TabChange> {
        self.changes.iter().find(|change| change.tab_name == name)
    }
}

impl KeywordPayload {
    /// Decode a tab contents payload; tab names must be unique
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: Self = serde_json::from_str(json)?;
        ensure_unique_tabs(&payload.card_id, payload.changes.iter().map(|t| t.tab_name.as_str()))?;
        Ok(payload)
    }

    pub fn tab(&self, name: &str) -> Option<&TabContent> {
        self.changes.iter().find(|tab| tab.tab_name == name)
    }
}

/// Tabs are addressed by name, so a repeated name would shadow a tab
fn ensure_unique_tabs<'a>(card_id: &str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(CardDiffError::invalid_payload(format!(
                "card {card_id} lists tab '{name}' more than once"
            )));
        }
    }
    Ok(())
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}
