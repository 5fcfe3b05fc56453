//! The tree node type.

use serde::{Deserialize, Serialize};

/// A node in the tree.
///
/// A node with no children is a leaf; anything else is a branch. Ids must be
/// unique across the whole tree since expansion, check state, selection and
/// editing are all keyed by id.
///
/// # Example
///
/// ```
/// use sylva_lib::TreeNode;
///
/// let tree = TreeNode::new("2", "Development_Source")
///     .child(TreeNode::new("2-1", "Main_Module.ts").with_color("#4caf50"))
///     .child(TreeNode::new("2-2", "Styles_Def.css"));
/// assert!(tree.is_branch());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique, stable identifier.
    pub id: String,
    /// Display text, also the target of search matching.
    pub label: String,
    /// Optional display color (e.g. `#4caf50`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Ordered children. Empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a leaf node.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: None,
            children: Vec::new(),
        }
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Appends a child.
    pub fn child(mut self, node: TreeNode) -> Self {
        self.children.push(node);
        self
    }

    /// Replaces the children.
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether this node has at least one child.
    pub fn is_branch(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Visits this node and every descendant in pre-order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a TreeNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}
