//! Tree data model
//!
//! [`TreeNode`] is the only node shape the engines accept. Trees are validated
//! once when they enter the store and are treated as immutable afterwards:
//! every edit in [`edit`] returns a fresh structural copy.

pub mod edit;
mod node;
mod validate;

pub use node::TreeNode;
pub use validate::{from_json, validate};
pub(crate) use validate::validate_insert;

/// Finds a node by id anywhere in the tree (depth-first).
pub fn find<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Collects the ids of every branch (node with children) in the tree.
pub fn branch_ids(nodes: &[TreeNode]) -> Vec<String> {
    let mut out = Vec::new();
    collect_branch_ids(nodes, &mut out);
    out
}

fn collect_branch_ids(nodes: &[TreeNode], out: &mut Vec<String>) {
    for node in nodes {
        if node.is_branch() {
            out.push(node.id.clone());
            collect_branch_ids(&node.children, out);
        }
    }
}

/// Total number of nodes in the tree, collapsed or not.
pub fn count(nodes: &[TreeNode]) -> usize {
    nodes.iter().map(|n| 1 + count(&n.children)).sum()
}
