//! Per-tab diff state for one comparison view
//!
//! Tabs live in an arena keyed by [`TabId`]. Each entry owns its diff, the
//! live container parsed from the diff's markup, and the change-group index
//! built on first attach. Switching tabs only moves the active id, so every
//! tab keeps its own cursor.

use super::change_groups::{rows_from_diff, scan, ChangeGroupIndex, FocusTarget};
use crate::diff::{DiffEngine, DiffMode, DiffResult};
use crate::dom::Document;
use crate::error::{CardDiffError, Result};
use crate::types::TabChange;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(usize);

impl TabId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct TabEntry {
    pub diff: DiffResult,
    container: Option<Document>,
    index: Option<ChangeGroupIndex>,
}

impl TabEntry {
    fn new(diff: DiffResult) -> Self {
        Self {
            diff,
            container: None,
            index: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.diff.tab_name
    }

    pub fn is_attached(&self) -> bool {
        self.container.is_some()
    }

    pub fn container(&self) -> Option<&Document> {
        self.container.as_ref()
    }

    pub fn change_groups(&self) -> Option<&ChangeGroupIndex> {
        self.index.as_ref()
    }

    /// Parse the container and scan groups unless already done
    fn attach(&mut self) -> (&mut ChangeGroupIndex, &mut Document) {
        let diff = &self.diff;
        let container = self
            .container
            .get_or_insert_with(|| Document::parse(&diff.rendered_markup));
        let index = self
            .index
            .get_or_insert_with(|| ChangeGroupIndex::attach(diff, container));
        (index, container)
    }

    fn replace(&mut self, diff: DiffResult) {
        self.diff = diff;
        self.container = None;
        self.index = None;
    }
}

/// Diff tabs of one version pair
#[derive(Debug, Clone)]
pub struct ComparisonWorkspace {
    engine: DiffEngine,
    tabs: Vec<TabEntry>,
    active: Option<TabId>,
    mode: DiffMode,
}

impl ComparisonWorkspace {
    pub fn new(engine: DiffEngine, mode: DiffMode) -> Self {
        Self {
            engine,
            tabs: Vec::new(),
            active: None,
            mode,
        }
    }

    /// Build one tab per change; the first tab becomes active
    pub fn from_changes(engine: DiffEngine, changes: &[TabChange], mode: DiffMode) -> Self {
        let mut workspace = Self::new(engine, mode);
        for change in changes {
            workspace.add_tab(&change.tab_name, &change.old_content, &change.new_content);
        }
        workspace
    }

    /// Diff a tab's raw old and new text and register it
    pub fn add_tab(&mut self, name: &str, old: &str, new: &str) -> TabId {
        let diff = self.engine.diff_texts(name, old, new, self.mode);
        let id = TabId(self.tabs.len());
        self.tabs.push(TabEntry::new(diff));
        if self.active.is_none() {
            self.active = Some(id);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn mode(&self) -> DiffMode {
        self.mode
    }

    pub fn tab(&self, id: TabId) -> Option<&TabEntry> {
        self.tabs.get(id.0)
    }

    pub fn tab_by_name(&self, name: &str) -> Option<TabId> {
        self.tabs.iter().position(|tab| tab.name() == name).map(TabId)
    }

    pub fn tabs(&self) -> impl Iterator<Item = (TabId, &TabEntry)> {
        self.tabs.iter().enumerate().map(|(i, tab)| (TabId(i), tab))
    }

    pub fn active(&self) -> Option<TabId> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&TabEntry> {
        self.active.and_then(|id| self.tab(id))
    }

    pub fn switch_tab(&mut self, id: TabId) -> Result<()> {
        if id.0 >= self.tabs.len() {
            return Err(CardDiffError::TabNotFound {
                tab: format!("#{}", id.0),
            });
        }
        debug!(tab = %self.tabs[id.0].name(), "switched tab");
        self.active = Some(id);
        Ok(())
    }

    pub fn switch_tab_by_name(&mut self, name: &str) -> Result<TabId> {
        let id = self
            .tab_by_name(name)
            .ok_or_else(|| CardDiffError::TabNotFound {
                tab: name.to_string(),
            })?;
        self.switch_tab(id)?;
        Ok(id)
    }

    /// Attach the active tab's container, scanning groups on first use
    pub fn attach(&mut self) -> Option<&ChangeGroupIndex> {
        let entry = self.active_entry_mut()?;
        let (index, _) = entry.attach();
        Some(index)
    }

    pub fn next(&mut self) -> Option<FocusTarget> {
        let (index, container) = self.active_entry_mut()?.attach();
        index.next(container)
    }

    pub fn prev(&mut self) -> Option<FocusTarget> {
        let (index, container) = self.active_entry_mut()?.attach();
        index.prev(container)
    }

    pub fn reset(&mut self) {
        if let Some(entry) = self.active_entry_mut() {
            let (index, container) = entry.attach();
            index.reset(container);
        }
    }

    /// Swap in a new diff for a tab, dropping its container and groups
    pub fn replace_diff(&mut self, id: TabId, diff: DiffResult) -> Result<()> {
        let entry = self.tabs.get_mut(id.0).ok_or_else(|| CardDiffError::TabNotFound {
            tab: diff.tab_name.clone(),
        })?;
        entry.replace(diff);
        Ok(())
    }

    /// Recompute every tab in the given mode
    pub fn set_mode(&mut self, mode: DiffMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        for entry in &mut self.tabs {
            let diff = self.engine.compute_diff(
                &entry.diff.tab_name,
                entry.diff.old_content.clone(),
                entry.diff.new_content.clone(),
                mode,
            );
            entry.replace(diff);
        }
        debug!(?mode, tabs = self.tabs.len(), "recomputed diffs");
    }

    /// Number of change groups per tab, in tab order
    pub fn change_counts(&self) -> Vec<(String, usize)> {
        self.tabs
            .iter()
            .map(|tab| {
                let count = match &tab.index {
                    Some(index) => index.len(),
                    None if tab.diff.is_degenerate => 0,
                    None => scan(&rows_from_diff(&tab.diff)).len(),
                };
                (tab.name().to_string(), count)
            })
            .collect()
    }

    /// `"i / n"` for the active tab
    pub fn position_label(&mut self) -> String {
        self.attach()
            .map(ChangeGroupIndex::position_label)
            .unwrap_or_else(|| "0 / 0".to_string())
    }

    /// Current markup of the active tab, including focus emphasis
    pub fn active_markup(&self) -> Option<String> {
        let entry = self.active_tab()?;
        Some(match &entry.container {
            Some(container) => container.to_html(),
            None => entry.diff.rendered_markup.clone(),
        })
    }

    fn active_entry_mut(&mut self) -> Option<&mut TabEntry> {
        let id = self.active?;
        self.tabs.get_mut(id.0)
    }
}
