//! Expansion state.
//!
//! Tracks which node ids are expanded. While a search is active every branch
//! of the filtered view is forced open; the pre-search set is held aside and
//! put back when the search is cleared. Toggles made during the search only
//! touch the live set, so they are dropped on restore.

use std::collections::HashSet;

use log::debug;

use crate::filter;
use crate::model::{self, TreeNode};

/// Whether a search is driving the expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPhase {
    /// Expansion follows user toggles.
    #[default]
    Normal,
    /// Expansion was forced open for a search.
    SearchActive,
}

/// Expanded ids plus the pre-search snapshot slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    /// Currently expanded ids.
    expanded: HashSet<String>,
    /// Expansion before the current search started.
    snapshot: Option<HashSet<String>>,
}

impl ExpansionState {
    /// Creates an empty state (everything collapsed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with the given ids expanded.
    pub fn with_expanded(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            expanded: ids.into_iter().collect(),
            snapshot: None,
        }
    }

    /// Creates a state with every branch of `nodes` expanded.
    pub fn all_expanded(nodes: &[TreeNode]) -> Self {
        Self::with_expanded(model::branch_ids(nodes))
    }

    /// The live expanded set.
    pub fn expanded(&self) -> &HashSet<String> {
        &self.expanded
    }

    /// The held pre-search set, if a search is active.
    pub fn snapshot(&self) -> Option<&HashSet<String>> {
        self.snapshot.as_ref()
    }

    /// Current phase.
    pub fn phase(&self) -> SearchPhase {
        if self.snapshot.is_some() {
            SearchPhase::SearchActive
        } else {
            SearchPhase::Normal
        }
    }

    /// Whether a search is forcing expansion.
    pub fn is_searching(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Whether `id` is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Reconciles expansion with the current query.
    ///
    /// `filtered` must be the filter result for `query`. With a non-empty
    /// query the live set becomes exactly the branches of `filtered`, taking a
    /// snapshot first if none is held. With an empty query a held snapshot is
    /// restored.
    pub fn sync_search(&mut self, query: &str, filtered: &[TreeNode]) {
        if filter::is_active(query) {
            if self.snapshot.is_none() {
                debug!(
                    "Search started, holding {} expanded ids",
                    self.expanded.len()
                );
                self.snapshot = Some(self.expanded.clone());
            }
            self.expanded = model::branch_ids(filtered).into_iter().collect();
            return;
        }

        if let Some(previous) = self.snapshot.take() {
            debug!("Search cleared, restoring {} expanded ids", previous.len());
            self.expanded = previous;
        }
    }

    // -------------------------------------------------------------------------
    // Expand/Collapse
    // -------------------------------------------------------------------------

    /// Flips one id. Descendants keep their own state.
    pub fn toggle(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    /// Expands one id. Returns whether it changed.
    pub fn expand(&mut self, id: &str) -> bool {
        self.expanded.insert(id.to_string())
    }

    /// Expands branches that just appeared in the data.
    ///
    /// While a search snapshot is held the ids go into the snapshot as well,
    /// so they are still open once the search is cleared.
    pub fn expand_new(&mut self, ids: &[String]) {
        self.expanded.extend(ids.iter().cloned());
        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.extend(ids.iter().cloned());
        }
    }

    /// Collapses one id. Returns whether it changed.
    pub fn collapse(&mut self, id: &str) -> bool {
        self.expanded.remove(id)
    }

    /// Expands every branch of `nodes`.
    pub fn expand_all(&mut self, nodes: &[TreeNode]) {
        self.expanded.extend(model::branch_ids(nodes));
    }

    /// Collapses everything.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Drops ids that no longer exist in `nodes` from the live set and the
    /// snapshot.
    pub fn retain_existing(&mut self, nodes: &[TreeNode]) {
        let mut ids = HashSet::new();
        for node in nodes {
            node.walk(&mut |n| {
                ids.insert(n.id.as_str());
            });
        }
        self.expanded.retain(|id| ids.contains(id.as_str()));
        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.retain(|id| ids.contains(id.as_str()));
        }
    }
}
