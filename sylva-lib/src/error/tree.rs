//! Tree data errors

use thiserror::Error;

/// Errors raised at the data-model boundary.
///
/// The engines themselves are total over validated trees; these errors only
/// surface when a tree (or a node being inserted) is loaded into the store.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A node was supplied with an empty id.
    #[error("node '{label}' has an empty id")]
    EmptyId {
        /// Label of the offending node, for diagnostics.
        label: String,
    },

    /// The same id appears more than once in the tree.
    #[error("duplicate node id '{id}'")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// An insert targeted a parent id that is not in the tree.
    #[error("no node with id '{id}' to insert under")]
    UnknownParent {
        /// The missing parent id.
        id: String,
    },

    /// Tree JSON could not be parsed.
    #[error("invalid tree json: {0}")]
    Json(#[from] serde_json::Error),
}

impl TreeError {
    /// Returns the node id this error refers to, if any.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            TreeError::DuplicateId { id } | TreeError::UnknownParent { id } => Some(id),
            TreeError::EmptyId { .. } | TreeError::Json(_) => None,
        }
    }
}
