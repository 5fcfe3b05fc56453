//! Commands accepted by the store.

use std::collections::HashSet;

use crate::config::RenderMode;
use crate::model::TreeNode;

/// A user action or host input, applied with [`TreeStore::apply`].
///
/// [`TreeStore::apply`]: super::TreeStore::apply
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the whole tree.
    SetData(Vec<TreeNode>),
    /// Change the search query.
    SetQuery(String),
    /// Enable or disable checkboxes.
    SetCheckable(bool),
    /// Replace the checked-id set (host-driven, emits nothing).
    SetChecked(HashSet<String>),
    /// Switch between full and virtual rendering.
    SetMode(RenderMode),

    /// Select a node (single click).
    Select(String),
    /// Move the selection by `n` visible rows.
    MoveSelection(isize),
    /// Double click / enter: branches toggle, leaves request open.
    Activate(String),

    /// Flip expansion of one node.
    ToggleExpand(String),
    /// Expand every branch.
    ExpandAll,
    /// Collapse every branch.
    CollapseAll,

    /// Flip a node and its subtree in the checked set.
    ToggleCheck(String),

    /// Start editing a label, seeding the buffer with the current label.
    BeginRename(String),
    /// Replace the edit buffer.
    EditRename(String),
    /// Apply the edit if the trimmed buffer is non-empty.
    CommitRename,
    /// Drop the edit.
    CancelRename,

    /// Ask for confirmation before deleting a node.
    RequestDelete(String),
    /// Delete the node awaiting confirmation.
    ConfirmDelete,
    /// Dismiss the confirmation.
    CancelDelete,

    /// Add a node under `parent`, or at top level.
    Insert {
        /// Parent id, `None` for top level.
        parent: Option<String>,
        /// The node to add (may carry children).
        node: TreeNode,
    },

    /// Set the scroll offset.
    Scroll(u32),
    /// Scroll by a signed amount.
    ScrollBy(i64),
    /// Set the measured viewport height (`None` when unmeasured).
    Resize(Option<u32>),
}

impl Command {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetData(_) => "set_data",
            Command::SetQuery(_) => "set_query",
            Command::SetCheckable(_) => "set_checkable",
            Command::SetChecked(_) => "set_checked",
            Command::SetMode(_) => "set_mode",
            Command::Select(_) => "select",
            Command::MoveSelection(_) => "move_selection",
            Command::Activate(_) => "activate",
            Command::ToggleExpand(_) => "toggle_expand",
            Command::ExpandAll => "expand_all",
            Command::CollapseAll => "collapse_all",
            Command::ToggleCheck(_) => "toggle_check",
            Command::BeginRename(_) => "begin_rename",
            Command::EditRename(_) => "edit_rename",
            Command::CommitRename => "commit_rename",
            Command::CancelRename => "cancel_rename",
            Command::RequestDelete(_) => "request_delete",
            Command::ConfirmDelete => "confirm_delete",
            Command::CancelDelete => "cancel_delete",
            Command::Insert { .. } => "insert",
            Command::Scroll(_) => "scroll",
            Command::ScrollBy(_) => "scroll_by",
            Command::Resize(_) => "resize",
        }
    }

    /// Whether this command only moves the viewport.
    pub fn is_scroll(&self) -> bool {
        matches!(
            self,
            Command::Scroll(_) | Command::ScrollBy(_) | Command::Resize(_)
        )
    }
}
