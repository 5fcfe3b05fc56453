//! Tree flattening.

use std::collections::HashSet;

use crate::model::TreeNode;

/// A visible node in the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Node id.
    pub id: String,
    /// Node label.
    pub label: String,
    /// Node color, if any.
    pub color: Option<String>,
    /// Depth in tree (0 = top level).
    pub level: u16,
    /// Whether the node has children.
    pub has_children: bool,
    /// Whether the node is expanded (drives the chevron, even for leaves).
    pub is_open: bool,
}

/// Flattens `nodes` into visible rows in pre-order.
///
/// Children of a node are emitted right after it when its id is in
/// `expanded`, or for every node when `force_expand` is set.
pub fn flatten(nodes: &[TreeNode], expanded: &HashSet<String>, force_expand: bool) -> Vec<Row> {
    let mut out = Vec::new();
    collect_visible(nodes, expanded, force_expand, 0, &mut out);
    out
}

/// Recursively collect visible nodes into the flat list.
fn collect_visible(
    nodes: &[TreeNode],
    expanded: &HashSet<String>,
    force_expand: bool,
    level: u16,
    out: &mut Vec<Row>,
) {
    for node in nodes {
        let is_open = force_expand || expanded.contains(&node.id);
        out.push(Row {
            id: node.id.clone(),
            label: node.label.clone(),
            color: node.color.clone(),
            level,
            has_children: node.is_branch(),
            is_open,
        });

        if is_open && node.is_branch() {
            collect_visible(&node.children, expanded, force_expand, level + 1, out);
        }
    }
}
