//! Tree store state.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::check::{self, CheckState};
use crate::config::{RenderMode, TreeConfig};
use crate::error::TreeError;
use crate::expansion::ExpansionState;
use crate::filter;
use crate::model::{self, TreeNode, edit};
use crate::view::{self, Row, Window};

use super::command::Command;
use super::event::TreeEvent;

/// A rename in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    /// Node being renamed.
    pub id: String,
    /// Current text in the edit buffer.
    pub value: String,
}

/// Single-writer store for a tree view.
///
/// Derived data (filtered view, rows, check states) is rebuilt eagerly in
/// dependency order whenever an input slot changes. Scroll and resize only
/// touch the scroll slots; the window is computed on demand from the cached
/// rows.
///
/// # Example
///
/// ```
/// use sylva_lib::{Command, TreeConfig, TreeNode, TreeStore};
///
/// let data = vec![TreeNode::new("A", "A")
///     .child(TreeNode::new("B", "B"))
///     .child(TreeNode::new("C", "C"))];
/// let mut store = TreeStore::new(data, TreeConfig::default()).unwrap();
/// store.apply(Command::SetQuery("b".into())).unwrap();
/// let ids: Vec<&str> = store.rows().iter().map(|r| r.id.as_str()).collect();
/// assert_eq!(ids, ["A", "B"]);
/// ```
#[derive(Debug, Clone)]
pub struct TreeStore {
    config: TreeConfig,

    /// Source tree.
    data: Vec<TreeNode>,
    /// Search query as typed.
    query: String,
    /// Expansion and search snapshot.
    expansion: ExpansionState,
    /// Whether checkboxes are shown and toggleable.
    checkable: bool,
    /// Checked ids (leaves and, after subtree toggles, branches).
    checked: HashSet<String>,
    /// Selected node id.
    selected: Option<String>,
    /// Rename in progress.
    editing: Option<PendingEdit>,
    /// Node awaiting delete confirmation.
    pending_delete: Option<String>,
    /// Scroll offset in the same units as `row_height`.
    scroll_offset: u32,
    /// Measured viewport height.
    viewport_height: Option<u32>,

    /// Filter result for (data, query).
    filtered: Vec<TreeNode>,
    /// Flattened visible rows of `filtered`.
    rows: Vec<Row>,
    /// Derived check state per node of `filtered`.
    check_states: HashMap<String, CheckState>,
}

impl TreeStore {
    /// Creates a store over a validated tree.
    pub fn new(data: Vec<TreeNode>, config: TreeConfig) -> Result<Self, TreeError> {
        model::validate(&data)?;
        let expansion = initial_expansion(config.mode, &data);
        let mut store = Self {
            config,
            data,
            query: String::new(),
            expansion,
            checkable: false,
            checked: HashSet::new(),
            selected: None,
            editing: None,
            pending_delete: None,
            scroll_offset: 0,
            viewport_height: None,
            filtered: Vec::new(),
            rows: Vec::new(),
            check_states: HashMap::new(),
        };
        store.refilter();
        Ok(store)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The configuration.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The source tree.
    pub fn data(&self) -> &[TreeNode] {
        &self.data
    }

    /// The current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The filtered tree the rows are built from.
    pub fn filtered(&self) -> &[TreeNode] {
        &self.filtered
    }

    /// Expansion state.
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Whether checkboxes are enabled.
    pub fn is_checkable(&self) -> bool {
        self.checkable
    }

    /// The checked-id set.
    pub fn checked(&self) -> &HashSet<String> {
        &self.checked
    }

    /// Selected id.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Rename in progress.
    pub fn editing(&self) -> Option<&PendingEdit> {
        self.editing.as_ref()
    }

    /// Node awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<&TreeNode> {
        self.pending_delete
            .as_deref()
            .and_then(|id| model::find(&self.data, id))
    }

    /// Scroll offset.
    pub fn scroll_offset(&self) -> u32 {
        self.scroll_offset
    }

    /// Measured viewport height.
    pub fn viewport_height(&self) -> Option<u32> {
        self.viewport_height
    }

    /// All visible rows, in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Index of the selected node among the visible rows.
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected.as_deref()?;
        self.rows.iter().position(|r| r.id == id)
    }

    /// Displayed check state of a node in the filtered view.
    pub fn check_state(&self, id: &str) -> CheckState {
        self.check_states
            .get(id)
            .copied()
            .unwrap_or(CheckState::Unchecked)
    }

    /// The window for the current scroll position.
    pub fn window(&self) -> Window {
        view::window_rows(
            self.rows.len(),
            self.scroll_offset,
            self.viewport_height,
            &self.config.window(),
        )
    }

    /// Rows to materialize, with their absolute indices.
    pub fn window_rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        let range = self.window().range;
        let start = range.start;
        self.rows[range].iter().enumerate().map(move |(i, row)| (start + i, row))
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Applies a command and returns the events it produced.
    ///
    /// Only `SetData` and `Insert` can fail; a failed command leaves the store
    /// unchanged.
    pub fn apply(&mut self, command: Command) -> Result<Vec<TreeEvent>, TreeError> {
        if command.is_scroll() {
            trace!("Applying {}", command.name());
        } else {
            debug!("Applying {}", command.name());
        }

        let mut events = Vec::new();
        match command {
            Command::SetData(data) => {
                model::validate(&data)?;
                self.replace_data(data);
            }
            Command::SetQuery(query) => {
                if query != self.query {
                    self.query = query;
                    self.refilter();
                }
            }
            Command::SetCheckable(checkable) => {
                self.checkable = checkable;
            }
            Command::SetChecked(checked) => {
                self.checked = checked;
                self.recheck();
            }
            Command::SetMode(mode) => self.set_mode(mode),

            Command::Select(id) => self.select(&id, &mut events),
            Command::MoveSelection(delta) => self.move_selection(delta, &mut events),
            Command::Activate(id) => self.activate(&id, &mut events),

            Command::ToggleExpand(id) => {
                self.expansion.toggle(&id);
                self.rebuild_rows();
            }
            Command::ExpandAll => {
                self.expansion.expand_all(&self.filtered);
                self.rebuild_rows();
            }
            Command::CollapseAll => {
                self.expansion.collapse_all();
                self.rebuild_rows();
            }

            Command::ToggleCheck(id) => self.toggle_check(&id, &mut events),

            Command::BeginRename(id) => {
                if let Some(node) = model::find(&self.data, &id) {
                    self.editing = Some(PendingEdit {
                        value: node.label.clone(),
                        id,
                    });
                }
            }
            Command::EditRename(value) => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.value = value;
                }
            }
            Command::CommitRename => self.commit_rename(&mut events),
            Command::CancelRename => {
                self.editing = None;
            }

            Command::RequestDelete(id) => {
                if model::find(&self.data, &id).is_some() {
                    self.pending_delete = Some(id);
                }
            }
            Command::ConfirmDelete => self.confirm_delete(&mut events),
            Command::CancelDelete => {
                self.pending_delete = None;
            }

            Command::Insert { parent, node } => {
                let data = edit::insert(&self.data, parent.as_deref(), node)?;
                self.replace_data(data);
                events.push(TreeEvent::DataChanged(self.data.clone()));
            }

            Command::Scroll(offset) => self.set_scroll_offset(offset),
            Command::ScrollBy(delta) => {
                let next = (self.scroll_offset as i64)
                    .saturating_add(delta)
                    .clamp(0, u32::MAX as i64);
                self.set_scroll_offset(next as u32);
            }
            Command::Resize(height) => {
                self.viewport_height = height;
                self.clamp_scroll();
            }
        }

        for event in &events {
            debug!("Emitting {}", event.name());
        }
        Ok(events)
    }

    fn replace_data(&mut self, data: Vec<TreeNode>) {
        if self.config.mode == RenderMode::Full {
            // New branches start open in full mode, existing ones keep state.
            let known: HashSet<String> = model::branch_ids(&self.data).into_iter().collect();
            let fresh: Vec<String> = model::branch_ids(&data)
                .into_iter()
                .filter(|id| !known.contains(id))
                .collect();
            self.expansion.expand_new(&fresh);
        }
        self.data = data;
        self.expansion.retain_existing(&self.data);
        if let Some(id) = self.selected.as_deref()
            && model::find(&self.data, id).is_none()
        {
            self.selected = None;
        }
        if let Some(edit) = self.editing.as_ref()
            && model::find(&self.data, &edit.id).is_none()
        {
            self.editing = None;
        }
        self.refilter();
    }

    fn set_mode(&mut self, mode: RenderMode) {
        if mode == self.config.mode {
            return;
        }
        self.config.mode = mode;
        self.expansion = initial_expansion(mode, &self.data);
        self.scroll_offset = 0;
        self.refilter();
    }

    fn select(&mut self, id: &str, events: &mut Vec<TreeEvent>) {
        let Some(node) = model::find(&self.data, id) else {
            return;
        };
        if let Some(edit) = self.editing.as_ref()
            && edit.id != id
        {
            self.editing = None;
        }
        self.selected = Some(id.to_string());
        events.push(TreeEvent::SelectionChanged(node.clone()));
    }

    fn move_selection(&mut self, delta: isize, events: &mut Vec<TreeEvent>) {
        if self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() - 1;
        let target = match self.selected_index() {
            Some(current) => current.saturating_add_signed(delta).min(last),
            None if delta < 0 => last,
            None => 0,
        };
        if Some(target) == self.selected_index() {
            return;
        }
        let id = self.rows[target].id.clone();
        self.select(&id, events);
        self.scroll_to_index(target);
    }

    fn activate(&mut self, id: &str, events: &mut Vec<TreeEvent>) {
        let Some(node) = model::find(&self.filtered, id) else {
            return;
        };
        if node.is_branch() {
            self.expansion.toggle(id);
            self.rebuild_rows();
        } else if let Some(node) = model::find(&self.data, id) {
            events.push(TreeEvent::OpenRequested(node.clone()));
        }
    }

    fn toggle_check(&mut self, id: &str, events: &mut Vec<TreeEvent>) {
        if !self.checkable {
            return;
        }
        // The displayed (filtered) subtree is what gets flipped.
        let Some(node) = model::find(&self.filtered, id) else {
            return;
        };
        self.checked = check::toggle(node, &self.checked);
        self.recheck();
        events.push(TreeEvent::CheckChanged(self.checked.clone()));
    }

    fn commit_rename(&mut self, events: &mut Vec<TreeEvent>) {
        let Some(edit) = self.editing.take() else {
            return;
        };
        if edit.value.trim().is_empty() {
            debug!("Ignoring empty rename of '{}'", edit.id);
            return;
        }
        let data = edit::rename(&self.data, &edit.id, &edit.value);
        self.replace_data(data);
        events.push(TreeEvent::DataChanged(self.data.clone()));
    }

    fn confirm_delete(&mut self, events: &mut Vec<TreeEvent>) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        let (data, removed) = edit::remove(&self.data, &id);
        if removed.is_none() {
            return;
        }
        self.replace_data(data);
        events.push(TreeEvent::DataChanged(self.data.clone()));
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    fn max_scroll_offset(&self) -> u32 {
        let window = self.config.window();
        let viewport = match self.viewport_height {
            Some(h) if h > 0 => h,
            _ => window.default_viewport_height,
        };
        let total = self.rows.len() as u64 * window.row_height as u64;
        total.saturating_sub(viewport as u64).min(u32::MAX as u64) as u32
    }

    fn set_scroll_offset(&mut self, offset: u32) {
        self.scroll_offset = offset.min(self.max_scroll_offset());
    }

    fn clamp_scroll(&mut self) {
        let max = self.max_scroll_offset();
        if self.scroll_offset > max {
            self.scroll_offset = max;
        }
    }

    /// Scrolls just enough to bring a row fully into view.
    fn scroll_to_index(&mut self, index: usize) {
        let window = self.config.window();
        let viewport = match self.viewport_height {
            Some(h) if h > 0 => h,
            _ => window.default_viewport_height,
        } as u64;
        let item_top = index as u64 * window.row_height as u64;
        let item_bottom = item_top + window.row_height as u64;
        let offset = self.scroll_offset as u64;

        if item_top < offset {
            self.scroll_offset = item_top as u32;
        } else if item_bottom > offset + viewport {
            self.scroll_offset = item_bottom.saturating_sub(viewport) as u32;
        }
    }

    // -------------------------------------------------------------------------
    // Derived data
    // -------------------------------------------------------------------------

    /// Filter, reconcile expansion, flatten, recompute check states.
    fn refilter(&mut self) {
        self.filtered = filter::filter_with(&self.data, &self.query, self.config.match_mode);
        self.expansion.sync_search(&self.query, &self.filtered);
        self.rebuild_rows();
        self.recheck();
    }

    /// Rebuild the flattened row list.
    fn rebuild_rows(&mut self) {
        // Full mode renders searches fully open regardless of toggles.
        let force = self.config.mode == RenderMode::Full && self.expansion.is_searching();
        self.rows = view::flatten(&self.filtered, self.expansion.expanded(), force);
        self.clamp_scroll();
        trace!("Rebuilt {} visible rows", self.rows.len());
    }

    fn recheck(&mut self) {
        self.check_states = check::check_states(&self.filtered, &self.checked);
    }
}

fn initial_expansion(mode: RenderMode, data: &[TreeNode]) -> ExpansionState {
    match mode {
        RenderMode::Full => ExpansionState::all_expanded(data),
        RenderMode::Virtual => ExpansionState::new(),
    }
}
