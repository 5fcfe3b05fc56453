//! Events emitted by the store.

use std::collections::HashSet;

use crate::model::TreeNode;

/// Output of a command, for the host to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEvent {
    /// A node was selected.
    SelectionChanged(TreeNode),
    /// A leaf was activated.
    OpenRequested(TreeNode),
    /// The tree was edited. Carries the full new tree.
    DataChanged(Vec<TreeNode>),
    /// The checked set changed. Carries the full new set.
    CheckChanged(HashSet<String>),
}

impl TreeEvent {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            TreeEvent::SelectionChanged(_) => "selection_changed",
            TreeEvent::OpenRequested(_) => "open_requested",
            TreeEvent::DataChanged(_) => "data_changed",
            TreeEvent::CheckChanged(_) => "check_changed",
        }
    }
}
